//! Navigation walk-through: the login page mounts the ambient background,
//! the user moves the pointer around, navigates to the contact page and
//! submits the form twice, then leaves.
//!
//! Usage: `scene_tour [settings.json]`

use backdrop::renderer::HeadlessRenderer;
use backdrop::settings::Settings;
use backdrop::surface::{Container, SceneSurface, TickOutcome, Timer};
use backdrop::{AmbientProgram, CONTACT_EXPLOSION_TRIGGER, ContactProgram, HostWindow};

const DT: f32 = 1.0 / 60.0;

fn load_settings() -> anyhow::Result<Settings> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("Loaded settings from {path}");
            Ok(Settings::from_json_str(&json)?)
        }
        None => Ok(Settings::default()),
    }
}

fn run(surface: &mut SceneSurface, frames: usize, label: &str) -> anyhow::Result<()> {
    let mut timer = Timer::new();
    let mut last = None;
    for _ in 0..frames {
        match surface.tick(DT)? {
            TickOutcome::Rendered(stats) => last = Some(stats),
            TickOutcome::Idle => break,
        }
    }
    let elapsed = timer.tick();
    if let Some(stats) = last {
        log::info!(
            "[{label}] frame {} in {:.2} ms: {} draw calls, {}/{} points in view, {}/{} solids in view",
            surface.frame_count(),
            elapsed * 1000.0,
            stats.draw_calls,
            stats.points_in_view,
            stats.points,
            stats.solids_in_view,
            stats.solids,
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = load_settings()?;
    let host = HostWindow::new(1280, 720);
    host.set_device_pixel_ratio(2.5);

    // 1. Login page: ambient background follows the pointer
    let mut login = SceneSurface::with_settings(host.clone(), settings.surface.clone());
    login.mount(
        Container::fill_window(&host),
        Box::new(HeadlessRenderer::new()),
        Some(Box::new(AmbientProgram::new(settings.ambient.clone()))),
    )?;
    run(&mut login, 60, "login")?;

    for (x, y) in [(1280.0, 0.0), (0.0, 720.0), (640.0, 360.0)] {
        host.dispatch_pointer_move(x, y);
        run(&mut login, 60, "login")?;
        if let Some(camera) = login.camera() {
            log::info!("[login] camera at {:?}", camera.position);
        }
    }

    host.set_inner_size(1024, 768);
    login.resize(1024, 768)?;
    run(&mut login, 30, "login")?;

    // 2. Navigate away: the background must leave nothing behind
    login.unmount();
    log::info!(
        "Left login page: {} pointer listener(s) remaining",
        host.pointer_listener_count()
    );

    // 3. Contact page: globe plus explosion on form submit
    let mut contact = SceneSurface::with_settings(host.clone(), settings.surface.clone());
    contact.mount(
        Container::fill_window(&host),
        Box::new(HeadlessRenderer::new()),
        Some(Box::new(ContactProgram::new(settings.contact.clone()))),
    )?;
    run(&mut contact, 30, "contact")?;

    for _ in 0..2 {
        host.invoke_trigger(CONTACT_EXPLOSION_TRIGGER);
    }
    run(&mut contact, 1, "contact")?;
    log::info!("[contact] {} explosion(s) live", contact.effect_count());
    run(&mut contact, 60, "contact")?;
    log::info!("[contact] {} explosion(s) live", contact.effect_count());

    contact.unmount();
    log::info!(
        "Left contact page: trigger registered = {}",
        host.has_trigger(CONTACT_EXPLOSION_TRIGGER)
    );
    Ok(())
}
