// Create the Error, ErrorKind, ResultExt, and Result types
// Result is a typedef of std `Result` with the error type our own `Error`
// Defines the From conversions that let ? work for our `Error`.
// ResultExt adds the `chain_err` trait method.
use error_chain::*;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        ImageWrite(::image::ImageError);
    }

    errors {
        InvalidConfiguration(reason: String) {
            description("invalid maze configuration")
            display("invalid maze configuration: {}", reason)
        }
        DisplaySurface(reason: String) {
            description("display surface failure")
            display("display surface failure: {}", reason)
        }
    }
}
