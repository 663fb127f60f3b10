use deli_base::Tensor;
use deli_pose3d::estimator::HEATMAP_SIZE;
use deli_pose3d::{decode_tensor, BodyPart, DecoderConfig, Human3D, BODY_PART_COUNT};
use std::env;
use std::fs;
use std::path::Path;

/// Read a raw little-endian f32 dump of a `[1, 21·32, 32, 32]` model output
fn load_heatmaps(path: &Path) -> Result<Tensor<f32>, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    if bytes.len() % 4 != 0 {
        return Err(format!("{}: length {} is not a multiple of 4", path.display(), bytes.len()).into());
    }
    let data: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    let s = HEATMAP_SIZE;
    Ok(Tensor::new(vec![1, BODY_PART_COUNT * s, s, s], data)?)
}

/// Heatmaps of a standing figure, one gaussian blob per joint
fn synthetic_heatmaps() -> Result<Tensor<f32>, Box<dyn std::error::Error>> {
    // (w, h, d) peak of each joint, in body-part order
    const PEAKS: [(f32, f32, f32); BODY_PART_COUNT] = [
        (16.0, 2.0, 16.0),  // Head_top
        (16.0, 9.0, 16.0),  // Thorax
        (12.0, 9.0, 16.0),  // R_Shoulder
        (11.0, 13.0, 15.0), // R_Elbow
        (11.0, 17.0, 14.0), // R_Wrist
        (20.0, 9.0, 16.0),  // L_Shoulder
        (21.0, 13.0, 15.0), // L_Elbow
        (21.0, 17.0, 14.0), // L_Wrist
        (14.0, 17.0, 16.0), // R_Hip
        (14.0, 23.0, 16.0), // R_Knee
        (14.0, 29.0, 16.0), // R_Ankle
        (18.0, 17.0, 16.0), // L_Hip
        (18.0, 23.0, 16.0), // L_Knee
        (18.0, 29.0, 16.0), // L_Ankle
        (16.0, 17.0, 16.0), // Pelvis
        (16.0, 13.0, 16.0), // Spine
        (16.0, 5.0, 16.0),  // Head
        (11.0, 19.0, 13.0), // R_Hand
        (21.0, 19.0, 13.0), // L_Hand
        (14.0, 31.0, 13.0), // R_Toe
        (18.0, 31.0, 13.0), // L_Toe
    ];

    let s = HEATMAP_SIZE;
    let mut tensor = Tensor::zeros(vec![1, BODY_PART_COUNT, s, s, s])?;
    for (k, &(pw, ph, pd)) in PEAKS.iter().enumerate() {
        for d in 0..s {
            for h in 0..s {
                for w in 0..s {
                    let dist2 = (w as f32 - pw).powi(2) + (h as f32 - ph).powi(2) + (d as f32 - pd).powi(2);
                    *tensor.get_mut(&[0, k, d, h, w])? = -dist2 / 2.0;
                }
            }
        }
    }
    let (_, data) = tensor.into_parts();
    Ok(Tensor::new(vec![1, BODY_PART_COUNT * s, s, s], data)?)
}

fn load_config() -> Result<DecoderConfig, Box<dyn std::error::Error>> {
    match env::var("DELI_DECODER_CONFIG") {
        Ok(path) => {
            let json = fs::read_to_string(&path)?;
            Ok(DecoderConfig::from_json(&json)?)
        }
        Err(_) => Ok(DecoderConfig::default()),
    }
}

fn report(human: &Human3D) {
    for part in BodyPart::ALL {
        if let Some(kp) = human.keypoint(part) {
            log::info!(
                "{:<10} x={:+.4} y={:+.4} z={:+.4}",
                part.name(),
                kp.x(),
                kp.y(),
                kp.z()
            );
        }
    }
    for line in &human.lines {
        log::debug!(
            "{} -> {} length {:.4}",
            line.from_part.name(),
            line.to_part.name(),
            line.length()
        );
    }
    match human.baseline_length() {
        Some(length) => log::info!("shoulder baseline length {:.4}", length),
        None => log::warn!("baseline joints missing"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    deli_base::init_stdout_logger();

    let config = load_config()?;
    let heatmaps = match env::args().nth(1) {
        Some(path) => {
            log::info!("Loading heatmaps from {}", path);
            load_heatmaps(Path::new(&path))?
        }
        None => {
            log::info!("No heatmap file given, using a synthetic figure");
            synthetic_heatmaps()?
        }
    };

    let human = decode_tensor(heatmaps, &config)?;
    log::info!(
        "Decoded {} joints and {} skeleton lines",
        human.keypoints.len(),
        human.lines.len()
    );
    report(&human);
    Ok(())
}
