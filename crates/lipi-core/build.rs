fn main() {
    // Validate embedded TOML files at compile time.
    validate_toml(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    );
    validate_toml(
        "data/custom_options.toml",
        include_str!("data/custom_options.toml"),
    );
    validate_toml(
        "data/script_list.toml",
        include_str!("data/script_list.toml"),
    );
    validate_toml(
        "data/common_typing.toml",
        include_str!("data/common_typing.toml"),
    );
    validate_toml(
        "data/scripts/normal.toml",
        include_str!("data/scripts/normal.toml"),
    );
    validate_toml(
        "data/scripts/romanized.toml",
        include_str!("data/scripts/romanized.toml"),
    );
    validate_toml(
        "data/scripts/devanagari.toml",
        include_str!("data/scripts/devanagari.toml"),
    );
    validate_toml(
        "data/scripts/sinhala.toml",
        include_str!("data/scripts/sinhala.toml"),
    );
    validate_toml(
        "data/scripts/tamil_extended.toml",
        include_str!("data/scripts/tamil_extended.toml"),
    );
    validate_toml(
        "data/scripts/telugu.toml",
        include_str!("data/scripts/telugu.toml"),
    );
    validate_toml(
        "data/scripts/tamil.toml",
        include_str!("data/scripts/tamil.toml"),
    );
    validate_toml(
        "data/scripts/bengali.toml",
        include_str!("data/scripts/bengali.toml"),
    );
    validate_toml(
        "data/scripts/kannada.toml",
        include_str!("data/scripts/kannada.toml"),
    );
    validate_toml(
        "data/scripts/gujarati.toml",
        include_str!("data/scripts/gujarati.toml"),
    );
    validate_toml(
        "data/scripts/malayalam.toml",
        include_str!("data/scripts/malayalam.toml"),
    );
    validate_toml(
        "data/scripts/odia.toml",
        include_str!("data/scripts/odia.toml"),
    );
    validate_toml(
        "data/scripts/gurumukhi.toml",
        include_str!("data/scripts/gurumukhi.toml"),
    );
    validate_toml(
        "data/scripts/assamese.toml",
        include_str!("data/scripts/assamese.toml"),
    );
}

fn validate_toml(path: &str, content: &str) {
    println!("cargo:rerun-if-changed={path}");
    if content.parse::<toml::Value>().is_err() {
        panic!("{path} contains invalid TOML");
    }
}
