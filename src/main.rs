fn main() -> anyhow::Result<()> {
    lovegrounds_lib::run()
}
