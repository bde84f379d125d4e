fn main() {
    edge_siege::game::run();
}
