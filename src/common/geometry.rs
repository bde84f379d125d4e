//! Plane geometry helpers.
//!
//! `Vec2` already carries the point arithmetic. What lives here are the few
//! operations with a degenerate case the gameplay code must not propagate as
//! NaN: a direction between coincident points has no answer.

use bevy::prelude::*;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector from `from` toward `to`, or `None` when the points coincide.
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// The point on the segment `start -> target` that stops `buffer` short of
/// `target`.
///
/// If `start` is already closer than `buffer`, the result lies behind `start`
/// (the mover backs off to the buffer). Coincident points return `start`.
pub fn point_short_of(start: Vec2, target: Vec2, buffer: f32) -> Vec2 {
    let Some(dir) = direction(start, target) else {
        return start;
    };
    start + dir * (distance(start, target) - buffer)
}

/// The point `reach` units from `origin` along the ray toward `toward`.
pub fn project(origin: Vec2, toward: Vec2, reach: f32) -> Option<Vec2> {
    direction(origin, toward).map(|dir| origin + dir * reach)
}
