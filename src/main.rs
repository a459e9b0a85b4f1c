use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use rampage::assets;
use rampage::audio::{AudioContext, AudioSink, NullAudio};
use rampage::input::{Action, ActionMap, InputState};
use rampage::logging::init_tracing;
use rampage::present::Presenter;
use rampage::{AssetError, EngineConfig, FrameClock, Game, Renderer};

const CONFIG_FILE: &str = "rampage.json";

fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
    let config = match EngineConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.tracing);

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            error!("failed to load assets: {e}");
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("failed to create event loop: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("event loop error: {e}");
        return ExitCode::FAILURE;
    }
    if app.failed {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App {
    config: EngineConfig,
    game: Game,
    renderer: Renderer,
    audio: Box<dyn AudioSink>,
    actions: ActionMap<Action>,
    input: InputState,
    clock: FrameClock,
    presenter: Option<Presenter>,
    last_instant: Option<Instant>,
    failed: bool,
}

impl App {
    fn new(config: EngineConfig) -> Result<Self, AssetError> {
        let textures = Arc::new(assets::load_textures(&config.textures_dir())?);
        let levels = assets::load_levels(&config.levels_path())?;
        let font = assets::load_font(&config.font_path())?;
        let game = Game::new(levels, font)?;
        let renderer = Renderer::new(config.render_width, config.render_height, textures);

        let audio: Box<dyn AudioSink> = if config.audio_enabled {
            let mut context = AudioContext::new();
            if context.is_available() {
                context.load_folder(&config.sounds_dir());
            }
            Box::new(context)
        } else {
            info!("audio disabled by config");
            Box::new(NullAudio)
        };

        let clock = FrameClock::new(config.max_time_step, config.world_time_step);
        Ok(Self {
            config,
            game,
            renderer,
            audio,
            actions: ActionMap::with_default_bindings(),
            input: InputState::new(),
            clock,
            presenter: None,
            last_instant: None,
            failed: false,
        })
    }

    fn frame(&mut self) {
        let now = Instant::now();
        let elapsed = match self.last_instant {
            Some(prev) => now.duration_since(prev).as_secs_f64(),
            None => 0.0,
        };
        self.last_instant = Some(now);

        let (_, time_step) = self.clock.steps(elapsed);
        let input = self.actions.to_input(&self.input, time_step);
        for action in self.game.advance(&self.clock, elapsed, input) {
            self.audio.dispatch(&action);
        }
        self.input.clear_frame_state();

        self.renderer.draw(&self.game);
        let Some(presenter) = self.presenter.as_mut() else { return };
        match presenter.present(self.renderer.bitmap()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = presenter.window.inner_size();
                presenter.resize(size);
            }
            Err(e) => warn!("render error: {e}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.presenter.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(&self.config.window_title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("failed to create window: {e}");
                self.failed = true;
                event_loop.exit();
                return;
            }
        };
        let frame_size = (self.config.render_width, self.config.render_height);
        match pollster::block_on(Presenter::new(window, frame_size)) {
            Ok(presenter) => self.presenter = Some(presenter),
            Err(e) => {
                error!("failed to set up presenter: {e}");
                self.failed = true;
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(presenter) = self.presenter.as_ref() {
            presenter.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(presenter) = self.presenter.as_mut() {
                    presenter.resize(size);
                }
            }

            WindowEvent::MouseInput { button, state, .. } => match state {
                ElementState::Pressed => self.input.press_mouse(button),
                ElementState::Released => self.input.release_mouse(button),
            },

            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(code), state, repeat, .. },
                ..
            } => match state {
                ElementState::Pressed if code == KeyCode::Escape => event_loop.exit(),
                ElementState::Pressed if !repeat => self.input.press_key(code),
                ElementState::Pressed => {}
                ElementState::Released => self.input.release_key(code),
            },

            WindowEvent::RedrawRequested => self.frame(),

            _ => {}
        }
    }
}
