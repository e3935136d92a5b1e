//! verdant-demo — headless driver for the particle visualization.
//!
//! Runs a full session against a synthetic data batch at a fixed timestep:
//! orbital preview, data-ready signal, ease-out, staggered explosion,
//! floating, then a few keyboard navigation steps. Frame summaries and
//! selection events go to stdout; set `RUST_LOG=debug` for the phase
//! transition log.

use verdant::prelude::*;

const DT: f32 = 1.0 / 60.0;
const SITES: usize = 40;

/// Renderer stub: counts frames and remembers the latest one.
struct HeadlessRenderer {
    frames: u64,
    last: RenderFrame,
}

impl Renderer for HeadlessRenderer {
    fn submit(&mut self, frame: &RenderFrame) {
        self.frames += 1;
        self.last = frame.clone();
    }
}

fn synthetic_batch() -> Vec<SiteRecord> {
    (1..=SITES as u32)
        .map(|rank| {
            let mut record = SiteRecord::new(rank, &format!("site-{rank:03}.example"), rank % 3 == 0);
            record.co2_per_page_view = Some(0.5 + rank as f64 * 0.01);
            record.rating = Some(if record.green { "A" } else { "D" }.to_string());
            record
        })
        .collect()
}

fn describe(record: &SiteRecord) -> String {
    // The core never fabricates values for missing metrics; show an
    // explicit placeholder instead.
    let co2 = record
        .co2_per_page_view
        .map(|v| format!("{v:.2} g"))
        .unwrap_or_else(|| "unavailable".to_string());
    format!(
        "rank {} {} (green: {}, co2/view: {co2})",
        record.rank.map_or("?".to_string(), |r| r.to_string()),
        record.domain,
        record.green,
    )
}

fn drain(viz: &mut Visualization) {
    for event in viz.take_events() {
        match event {
            VizEvent::SelectionChanged(record) => {
                println!("selected  -> {}", describe(&record));
                if let Ok(json) = serde_json::to_string(&record) {
                    log::debug!("selection payload: {json}");
                }
            }
            VizEvent::HoverChanged(Some(record)) => println!("hovering  -> {}", describe(&record)),
            VizEvent::HoverChanged(None) => println!("hovering  -> none"),
        }
    }
}

fn run_for(session: &mut RenderLoop<HeadlessRenderer>, seconds: f32) {
    let steps = (seconds / DT).ceil() as usize;
    for _ in 0..steps {
        session.frame_with(DT);
        drain(session.viz_mut());
    }
}

fn main() {
    env_logger::init();

    let cfg = VizConfig {
        pool_size: SITES,
        seed: Some(2024),
        ..VizConfig::default()
    };
    let mut session = RenderLoop::new(
        Visualization::new(cfg),
        HeadlessRenderer {
            frames: 0,
            last: RenderFrame::default(),
        },
    );

    println!("== orbital preview ==");
    run_for(&mut session, 2.0);

    // Nudge the swarm with the pointer while it is still orbiting.
    session
        .viz_mut()
        .handle_input(InputEvent::PointerMove { x: 9.5, y: 0.5 });

    println!("== data ready: {SITES} records ==");
    session.viz_mut().data_ready(synthetic_batch());
    run_for(&mut session, 4.0);
    assert_eq!(session.viz().phase(), Phase::Floating);

    println!("== keyboard navigation ==");
    session.viz_mut().handle_input(InputEvent::Key(NavKey::Next));
    session.viz_mut().handle_input(InputEvent::Key(NavKey::Next));
    session.viz_mut().handle_input(InputEvent::Key(NavKey::Previous));
    run_for(&mut session, 0.5);

    // Hover whatever ended up selected, then leave the surface.
    let hover_target = session
        .viz()
        .selected_record()
        .and_then(|r| r.rank)
        .and_then(|rank| session.viz().pool().find_by_rank(rank))
        .and_then(|index| session.viz().pool().get(index))
        .map(|p| p.position);
    if let Some(position) = hover_target {
        session
            .viz_mut()
            .handle_input(InputEvent::PointerMove { x: position.x, y: position.y });
        run_for(&mut session, 0.2);
        session.viz_mut().handle_input(InputEvent::PointerLeave);
        drain(session.viz_mut());
    }

    let renderer = session.into_renderer();
    println!(
        "== done: {} frames, {} particles, marker at {:?} ==",
        renderer.frames,
        renderer.last.instances.len(),
        renderer.last.marker.map(|m| (m.position.x, m.position.y)),
    );
}
