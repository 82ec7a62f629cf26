//! Generates the Swift and Kotlin bindings for `actionkit-core`.

fn main() {
    uniffi::uniffi_bindgen_main();
}
