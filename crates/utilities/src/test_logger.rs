/// Initialises `env_logger` for tests. The output is captured by the test
/// harness, and `RUST_LOG` selects the level as usual.
pub fn test_logger() {
    // Tests run in parallel, so the logger may already be installed.
    let _ = env_logger::builder().is_test(true).try_init();
}
