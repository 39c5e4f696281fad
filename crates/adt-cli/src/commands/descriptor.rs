//! Print the plugin descriptor.

use adt_host::{PluginProperties, PortDirection, PortKind, descriptor};
use clap::Args;

/// Arguments for `adt descriptor`.
#[derive(Args)]
pub struct DescriptorArgs {
    /// Plugin index in the library
    #[arg(long, default_value = "0")]
    index: usize,
}

/// Run the descriptor command.
pub fn run(args: DescriptorArgs) -> anyhow::Result<()> {
    let Some(desc) = descriptor(args.index) else {
        anyhow::bail!("no plugin at index {}", args.index);
    };

    println!("{}", desc.name);
    println!("{}", "=".repeat(desc.name.len()));
    println!("Unique ID:  {}", desc.unique_id);
    println!("Label:      {}", desc.label);
    println!("Maker:      {}", desc.maker);
    println!("Copyright:  {}", desc.copyright);
    println!("Properties: {}", properties_str(desc.properties));

    println!("\nPorts:");
    for port in &desc.ports {
        let direction = match port.direction {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
        };
        let kind = match port.kind {
            PortKind::Audio => "audio",
            PortKind::Control => "control",
        };
        println!(
            "  {}  {:<22} {:<7} {}",
            port.role.index(),
            port.name,
            direction,
            kind
        );
    }

    Ok(())
}

fn properties_str(props: PluginProperties) -> String {
    let names: Vec<&str> = [
        (PluginProperties::REALTIME, "REALTIME"),
        (PluginProperties::INPLACE_BROKEN, "INPLACE_BROKEN"),
        (PluginProperties::HARD_RT_CAPABLE, "HARD_RT_CAPABLE"),
    ]
    .into_iter()
    .filter(|(flag, _)| props.contains(*flag))
    .map(|(_, name)| name)
    .collect();

    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(" | ")
    }
}
