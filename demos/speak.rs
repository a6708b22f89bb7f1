use std::path::{Path, PathBuf};

use bvcu_rs::engines::{bvcu::BvcuEngine, espeak::EspeakSynthesizer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let voice_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("voices"));

    let mut engine = BvcuEngine::new(EspeakSynthesizer::new());
    engine.load_voice(&voice_dir)?;

    if let Some(resources) = engine.resources() {
        println!(
            "Inventory: {}",
            serde_json::to_string_pretty(resources.inventory())?
        );
        println!(
            "Voice data: {} bytes",
            resources.voice_data().map_or(0, <[u8]>::len)
        );
    }
    match engine.selected_voice() {
        Some(voice) => println!("Selected voice: {} ({})", voice.id, voice.name),
        None => println!("No matching voice; using the backend default"),
    }

    let text = "Bonjour! Ceci est une démonstration de synthèse vocale \
                à partir d'un répertoire de fichiers de voix BVCU.";

    engine.save_to_file(text, Path::new("output.wav"))?;
    println!("Saved to output.wav");

    Ok(())
}
