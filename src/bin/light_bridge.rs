use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info};
use serde_derive::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use hue::bridge::{ApiCall, ApiNotifier, ApiResponse, Bridge, LightForwarder};
use hue::error::DynResult;
use hue::light_control::controller::ControllerConfig;
use hue::light_control::gamut::{self, GamutPolicy};
use hue::light_control::registry::{Light, LightRegistry, RegistryConfig};
use hue_bridge as hue;

/// One request per input line
#[derive(Deserialize, Debug)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Request {
    Lights,
    State { id: String, payload: Value },
    Name { id: String, name: String },
}

type DeviceSender = mpsc::UnboundedSender<(String, Light)>;
type DeviceReceiver = mpsc::UnboundedReceiver<(String, Light)>;

struct DeviceForwarder {
    tx: DeviceSender,
}

impl LightForwarder for DeviceForwarder {
    fn send_light(&mut self, id: &str, light: &Light) {
        if let Err(e) = self.tx.send((id.to_string(), light.clone())) {
            error!("Failed to forward light {}: {}", id, e);
        }
    }
}

struct LogNotifier;

impl ApiNotifier for LogNotifier {
    fn notify(&mut self, call: &ApiCall, response: &ApiResponse) {
        let res = match response {
            ApiResponse::Lights(lights) => serde_json::to_string(lights),
            ApiResponse::Changes(changes) => serde_json::to_string(changes),
        };
        match res {
            Ok(res) => debug!("API call {:?}: {}", call, res),
            Err(e) => error!("Failed to serialize response to {:?}: {}", call, e),
        }
    }
}

// Stands in for the connection to the physical light
async fn device_task(mut rx: DeviceReceiver) {
    while let Some((id, light)) = rx.recv().await {
        let state = &light.state;
        if state.on {
            info!(
                "Light {} ({}): color {} brightness {}",
                id,
                light.name,
                state.display_color(),
                state.bri
            );
        } else {
            info!("Light {} ({}): off", id, light.name);
        }
    }
    debug!("Device channel closed");
}

fn handle_request(bridge: &mut Bridge, req: Request) -> DynResult<String> {
    let reply = match req {
        Request::Lights => serde_json::to_string(&bridge.lights())?,
        Request::State { id, payload } => {
            serde_json::to_string(&bridge.set_light_state(&id, &payload)?)?
        }
        Request::Name { id, name } => serde_json::to_string(&bridge.set_light_name(&id, &name)?)?,
    };
    Ok(reply)
}

fn error_reply(description: &str) -> String {
    json!([{"error": {"description": description}}]).to_string()
}

async fn load_registry(args: &CmdArgs) -> DynResult<LightRegistry> {
    match &args.lights {
        Some(path) => {
            let data = tokio::fs::read_to_string(path).await?;
            let conf: RegistryConfig = serde_json::from_str(&data)?;
            Ok(LightRegistry::from_config(&conf))
        }
        None => Ok(LightRegistry::with_default_lights(
            args.light_count,
            &args.model,
        )),
    }
}

#[derive(Parser, Debug)]
#[command(about = "Emulated light bridge. Reads JSON requests from stdin, one per line")]
struct CmdArgs {
    /// Light configuration file (JSON)
    #[arg(short = 'l', long)]
    lights: Option<PathBuf>,
    /// Number of lights when no configuration file is given
    #[arg(long, default_value_t = 3)]
    light_count: usize,
    /// Model of the lights when no configuration file is given
    #[arg(long, default_value = gamut::DEFAULT_MODEL)]
    model: String,
    /// Colors outside the gamut: advisory, clamp or reject
    #[arg(long, default_value_t = GamutPolicy::Advisory)]
    gamut_policy: GamutPolicy,
    /// Zero brightness, hue or saturation is a value, not a missing field
    #[arg(long)]
    zero_is_value: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = CmdArgs::parse();

    let registry = match load_registry(&args).await {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to load lights: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let config = ControllerConfig {
        gamut_policy: args.gamut_policy,
        zero_is_unset: !args.zero_is_value,
    };
    info!(
        "Bridge with {} lights, gamut policy {}",
        registry.len(),
        config.gamut_policy
    );

    let (device_tx, device_rx) = mpsc::unbounded_channel();
    let device_join = tokio::spawn(device_task(device_rx));
    let mut bridge = Bridge::new(registry, config)
        .forwarder(Box::new(DeviceForwarder { tx: device_tx }))
        .notifier(Box::new(LogNotifier));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut status = ExitCode::SUCCESS;
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read request: {}", e);
                status = ExitCode::FAILURE;
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let reply = match serde_json::from_str::<Request>(&line) {
            Ok(req) => handle_request(&mut bridge, req).unwrap_or_else(|e| {
                error!("Request failed: {}", e);
                error_reply(&e.to_string())
            }),
            Err(e) => {
                error!("Invalid request: {}", e);
                error_reply(&format!("Invalid request: {e}"))
            }
        };
        if let Err(e) = stdout.write_all(format!("{reply}\n").as_bytes()).await {
            error!("Failed to write reply: {}", e);
            status = ExitCode::FAILURE;
            break;
        }
        if let Err(e) = stdout.flush().await {
            error!("Failed to flush reply: {}", e);
        }
    }

    // Closes the device channel
    drop(bridge);
    if let Err(e) = device_join.await {
        error!("Device task failed: {}", e);
    }
    status
}
