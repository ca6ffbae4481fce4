use super::host::Host;

/// A host wrapping the Rust standard library.
#[derive(Default)]
pub struct StdHost;

impl Host for StdHost {
    fn println(&mut self, text: &str) {
        println!("{text}");
    }

    fn eprintln(&mut self, text: &str) {
        eprintln!("{text}");
    }
}
