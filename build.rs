fn main() {
    // Emit esp-idf link/search directives only when building the firmware
    // target. Host-side test builds (--no-default-features) skip this so
    // they don't require an ESP-IDF toolchain environment.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
