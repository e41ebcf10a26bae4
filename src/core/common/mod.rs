pub mod error;
pub use error::ArborError;

#[cfg(test)]
mod tests {
    mod error_tests;
}
