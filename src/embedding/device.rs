use candle_core::Device;
use tracing::{info, warn};

use super::error::EmbeddingError;

/// GPU backends compiled into this build, in order of preference.
fn compiled_backends() -> Vec<&'static str> {
    let mut backends = Vec::new();
    if cfg!(feature = "metal") {
        backends.push("metal");
    }
    if cfg!(feature = "cuda") {
        backends.push("cuda");
    }
    backends
}

fn open_backend(name: &str) -> candle_core::Result<Device> {
    match name {
        "metal" => Device::new_metal(0),
        "cuda" => Device::new_cuda(0),
        other => Err(candle_core::Error::Msg(format!("unknown backend {other}"))),
    }
}

/// Picks the first usable GPU backend, falling back to CPU.
///
/// The `metal` / `cuda` features control which backends are attempted. A
/// missing GPU is not an error; the fallback is logged.
pub fn select_device() -> Result<Device, EmbeddingError> {
    let backends = compiled_backends();
    if backends.is_empty() {
        info!("No GPU backend compiled, using CPU");
        return Ok(Device::Cpu);
    }

    let mut failures = Vec::with_capacity(backends.len());
    for name in backends {
        match open_backend(name) {
            Ok(device) => {
                info!(backend = name, "Using GPU acceleration");
                return Ok(device);
            }
            Err(e) => {
                warn!(backend = name, error = %e, "GPU backend unavailable");
                failures.push(format!("{name} failed: {e}"));
            }
        }
    }

    warn!(reason = %failures.join("; "), "Falling back to CPU device");
    Ok(Device::Cpu)
}
