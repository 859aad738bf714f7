fn main() {
    // ESP-IDF link args are only relevant when the espidf feature set is
    // active; host test builds must not require an ESP toolchain.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
