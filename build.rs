fn main() {
    // Host builds (tests, fuzzing) skip the ESP-IDF environment entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
