mod table;
mod view;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use parking_lot::Mutex;
use winit::dpi::LogicalSize;

use glowline_engine::core::FieldApp;
use glowline_engine::device::GpuInit;
use glowline_engine::logging::{init_logging, LoggingConfig};
use glowline_engine::render::RendererConfig;
use glowline_engine::sync::FrameSync;
use glowline_engine::time::FrameClock;
use glowline_engine::window::{Runtime, RuntimeConfig};

use table::Table;
use view::TableView;

const TICK: Duration = Duration::from_micros(16_667);

/// Fixed-tick simulation loop. Each tick steps the table under its lock, then
/// waits for the frame showing that state before starting the next one.
fn run_simulation(table: Arc<Mutex<Table>>, sync: FrameSync) {
    let mut clock = FrameClock::new();
    let mut next = Instant::now();

    while !sync.is_closed() {
        let ticks = {
            let mut table = table.lock();
            table.step(TICK.as_secs_f32());
            table.ticks()
        };
        sync.request_draw();

        let t = clock.tick();
        if ticks % 240 == 0 {
            log::info!("tick {ticks}: {:.1} ticks/s", t.fps);
        }

        next += TICK;
        let now = Instant::now();
        if next > now {
            thread::sleep(next - now);
        } else {
            // Fell behind (slow frames); do not try to catch up.
            next = now;
        }
    }
    log::info!("simulation stopped");
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let table = Arc::new(Mutex::new(Table::standard()));
    let view = Arc::new(TableView::new(Arc::clone(&table), 2.0));

    let mut sim = None;
    let config = RuntimeConfig {
        title: "glowline table".to_string(),
        initial_size: LogicalSize::new(600.0, 800.0),
    };

    Runtime::run(config, GpuInit::default(), |handle| {
        let sync = FrameSync::new(Arc::new(handle));
        let app = FieldApp::new(view, sync.completer(), RendererConfig::default());
        sim = Some(thread::spawn(move || run_simulation(table, sync)));
        app
    })?;

    if let Some(sim) = sim {
        if sim.join().is_err() {
            log::error!("simulation thread panicked");
        }
    }
    Ok(())
}
