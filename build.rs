use std::fs;

fn main() {
    // leafmark embeds this file with include_str!, so it must parse
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("leafmark default_config.toml is missing");

    if let Err(e) = content.parse::<toml::Table>() {
        panic!("leafmark default_config.toml is not valid TOML: {}", e);
    }
}
