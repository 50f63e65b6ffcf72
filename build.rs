fn main() {
    println!("cargo:rerun-if-env-changed=APPLESLICE_CONFIG");

    // ESP-IDF builds need the sysenv exported for esp-idf-sys; host builds
    // have nothing to generate.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
