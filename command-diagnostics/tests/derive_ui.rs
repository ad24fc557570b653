//! Compile tests for `#[derive(Command)]` as used from a downstream crate.

#[test]
fn derive_pass_tests() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/*.rs");
}
