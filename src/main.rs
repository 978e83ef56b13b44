//! Grove demo
//!
//! Grows one preset plant, animates it headlessly and reports how the growth
//! front advanced.
//!
//! Usage: `grove [preset] [seed] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(e) = native::run(std::env::args().skip(1).collect()) {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on the web; a host page drives `LSystem::tick` itself
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use grove::plants::Variation;
    use grove::renderer::tessellate;
    use grove::sim::{Mark, ValueNoise};
    use grove::{ConfigError, PlantPreset, Settings};

    pub fn run(args: Vec<String>) -> Result<(), ConfigError> {
        let preset = match args.first() {
            Some(name) => PlantPreset::parse(name)?,
            None => PlantPreset::Flower1,
        };

        let mut settings = match args.get(2) {
            Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
            None => Settings::default(),
        };
        if let Some(seed) = args.get(1) {
            settings.seed = seed.parse().map_err(|_| ConfigError::InvalidSetting {
                field: "seed",
                reason: format!("not an unsigned integer: {seed}"),
            })?;
        }

        let name = preset.as_str();
        log::info!("Grove starting: {} (seed {})", name, settings.seed);

        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let noise = ValueNoise::new(settings.seed);
        let definition = preset.definition();
        let variation = Variation::default();
        let mut plant = definition.grow(&settings, Vec2::ZERO, variation, &mut rng)?;

        println!(
            "{}: {} generations, {} symbols, age {}, {} transforms",
            definition.name,
            plant.generation(),
            plant.sentence().len(),
            plant.age(),
            plant.transforms().len()
        );

        let mut marks = Vec::new();
        let mut grown_at = None;
        for frame in 0..settings.frames {
            marks.clear();
            let time = frame as f32 * settings.frame_time;
            plant.tick_into(time, &mut rng, &noise, &mut marks);

            if frame % 60 == 0 {
                let segments = marks
                    .iter()
                    .filter(|m| matches!(m, Mark::Segment { .. }))
                    .count();
                let vertices = tessellate(&marks).len();
                log::debug!(
                    "Frame {}: {} segments, {} buds, {} vertices",
                    frame,
                    segments,
                    marks.len() - segments,
                    vertices
                );
            }
            if grown_at.is_none() && plant.is_fully_grown() {
                grown_at = Some(frame);
            }
        }

        match grown_at {
            Some(frame) => println!("fully grown after {} frames", frame + 1),
            None => println!("still growing after {} frames", settings.frames),
        }
        println!(
            "last frame: {} marks, {} vertices",
            marks.len(),
            tessellate(&marks).len()
        );
        Ok(())
    }
}
