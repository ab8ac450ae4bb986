//! UniFFI bindgen CLI tool for generating language bindings.
//!
//! Generates Swift and Kotlin bindings for the catalog browser from the
//! compiled recipe_catalog library.
//!
//! ## Usage
//!
//! ```bash
//! cargo build --release
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/librecipe_catalog.so --language swift --out-dir ./bindings
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/librecipe_catalog.so --language kotlin --out-dir ./bindings
//! ```

fn main() {
    uniffi::uniffi_bindgen_main()
}
