use crate::layout::{GeometryInstruction, Layout};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON form of the geometry contract, for external renderers that consume
/// the layout instead of the built-in SVG shell.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub orientation: String,
    pub ceiling: u32,
    pub ticks: Vec<u32>,
    pub ranges: Vec<RangeDump>,
    pub singletons: Vec<SingletonDump>,
    pub instructions: Vec<GeometryInstruction>,
}

#[derive(Debug, Serialize)]
pub struct RangeDump {
    pub start: u32,
    pub end: u32,
    pub owner_id: String,
    pub owner_label: String,
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub struct SingletonDump {
    pub port: u32,
    pub position: f32,
    pub direction: String,
    pub tier: u8,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let ranges = layout
            .ranges
            .iter()
            .map(|range| RangeDump {
                start: range.start,
                end: range.end,
                owner_id: range.owner_id.clone(),
                owner_label: range.owner_label.clone(),
                count: range.count,
            })
            .collect();

        let singletons = layout
            .singletons
            .iter()
            .map(|placement| SingletonDump {
                port: placement.entry.port,
                position: placement.position,
                direction: format!("{:?}", placement.direction),
                tier: placement.tier,
            })
            .collect();

        LayoutDump {
            orientation: format!("{:?}", layout.orientation),
            ceiling: layout.scale.ceiling,
            ticks: layout.scale.ticks.clone(),
            ranges,
            singletons,
            instructions: layout.instructions.clone(),
        }
    }
}

pub fn write_layout_dump(layout: &Layout, output: Option<&Path>) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    match output {
        Some(path) => {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, &dump)?;
            handle.write_all(b"\n")?;
        }
    }
    Ok(())
}
