//! Windowed demo: synthesizes an RGB test pattern and presents it.
//!
//! Useful as a smoke check that the presenter, shaders, and surface wiring
//! produce a correctly oriented image on the local GPU.

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use pixelview::logging::{init_logging, LoggingConfig};
use pixelview::ImagePresenter;

const PATTERN_WIDTH: u32 = 512;
const PATTERN_HEIGHT: u32 = 288;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut app = DemoApp::default();

    event_loop
        .run_app(&mut app)
        .context("winit event loop terminated with error")?;

    Ok(())
}

#[self_referencing]
struct Entry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    presenter: ImagePresenter<'this>,
}

#[derive(Default)]
struct DemoApp {
    entry: Option<Entry>,
    pattern: Vec<u8>,
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("pixelview demo")
            .with_inner_size(PhysicalSize::new(PATTERN_WIDTH, PATTERN_HEIGHT))
            .with_resizable(false);

        let window = match event_loop.create_window(attrs) {
            Ok(w) => w,
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        self.pattern = test_pattern(PATTERN_WIDTH, PATTERN_HEIGHT);

        let entry = EntryBuilder {
            window,
            presenter_builder: |w| {
                ImagePresenter::new(w).expect("GPU initialization failed for window")
            },
        }
        .build();

        entry.borrow_window().request_redraw();
        self.entry = Some(entry);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                let Some(entry) = self.entry.as_mut() else {
                    return;
                };
                let pattern = &self.pattern;

                let result = entry.with_presenter_mut(|presenter| {
                    presenter.present(pattern, PATTERN_WIDTH, PATTERN_HEIGHT)
                });

                if let Err(e) = result {
                    log::error!("image could not be displayed: {e}");
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}

/// Left half red, right half blue (the reference orientation frame), with a
/// green ramp down the rows to make a vertical flip obvious at a glance.
fn test_pattern(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        let green = (y * 255 / height.max(1)) as u8;
        for x in 0..width {
            if x < width / 2 {
                pixels.extend_from_slice(&[255, green, 0]);
            } else {
                pixels.extend_from_slice(&[0, green, 255]);
            }
        }
    }
    pixels
}
