fn main() -> Result<(), Box<dyn std::error::Error>> {
    revealer::cli::main()
}
