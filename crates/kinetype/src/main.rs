use std::{
    cell::Cell,
    fs::File,
    path::PathBuf,
    rc::Rc,
    time::{Duration, Instant},
};

use color_eyre::eyre::WrapErr;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
};
use env_logger::{Env, Target};
use kinetype_config::Config;
use kinetype_engine::{
    FormationController, FrameHooks, Runner, RunnerState, Sequencer, SequencerState, StepReport,
    Subscription, World,
};
use log::{info, warn};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Size},
    style::{Color, Stylize},
    text::Line,
};

mod render;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref()).wrap_err("failed to load configuration")?;
    init_logging(&config)?;
    let app = App::new(config)?;

    let terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;
    let result = app.run(terminal);
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// Log to the configured file. The terminal belongs to the UI, so without a
/// log file nothing is logged.
fn init_logging(config: &Config) -> color_eyre::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .wrap_err("failed to initialise logging")?;
    Ok(())
}

/// Everything that gets drawn.
struct Scene {
    world: World,
    sequencer: Sequencer,
    /// Canvas units per half-block pixel.
    unit: f32,
    background: Color,
    accent: Color,
    last_report: StepReport,
    frame_ms: f64,
    finishes: Rc<Cell<u32>>,
    _finish: Subscription,
}

impl Scene {
    /// Integrate one step.
    fn step(&mut self, elapsed_ms: f64) {
        self.last_report = self.world.update();
        self.frame_ms = elapsed_ms;
    }

    /// Show the next word, or scatter.
    fn next(&mut self) {
        match self.sequencer.advance(&mut self.world) {
            Ok(outcome) => info!("advance: {outcome:?}"),
            Err(err) => warn!("advance failed: {err}"),
        }
    }

    fn resize(&mut self, size: Size) {
        // Last row is the status line
        let size = Size::new(size.width, size.height.saturating_sub(1));
        self.world.resize(render::canvas_for(size, self.unit));
    }

    fn render(&self, frame: &mut Frame, runner: RunnerState) {
        let [canvas_area, status_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        render::draw_world(frame, canvas_area, &self.world, self.unit, self.background);

        let section = match self.sequencer.state() {
            SequencerState::Idle => "idle".to_string(),
            SequencerState::SectionActive(kind) => format!("{kind:?}").to_lowercase(),
            SequencerState::Finished => "finished".to_string(),
        };
        let fps = if self.frame_ms > 0.0 {
            1000.0 / self.frame_ms
        } else {
            0.0
        };
        let accent = self.accent;
        let mut spans = vec![
            format!(" {section}").bold().fg(accent),
            format!(
                "  {}  {} particles  {fps:.0} fps  loops {}",
                if self.sequencer.is_free() { "free" } else { "formed" },
                self.world.len(),
                self.finishes.get(),
            )
            .dark_gray(),
        ];
        if runner != RunnerState::Running {
            spans.push(format!("  {runner:?}").to_lowercase().bold().fg(accent));
        }
        if !self.last_report.faults.is_empty() {
            spans.push(format!("  {} faults", self.last_report.faults.len()).red());
        }
        spans.extend([
            "   space".bold().fg(accent),
            " next ".dark_gray(),
            "p".bold().fg(accent),
            " pause ".dark_gray(),
            "s".bold().fg(accent),
            " stop ".dark_gray(),
            "r".bold().fg(accent),
            " restart ".dark_gray(),
            "l".bold().fg(accent),
            (if self.sequencer.looping() { " loop:on " } else { " loop:off " }).dark_gray(),
            "q".bold().fg(accent),
            " quit".dark_gray(),
        ]);
        frame.render_widget(Line::from(spans), status_area);
    }
}

/// Hooks for one admitted frame: integrate, then draw.
struct FrameDriver<'a> {
    scene: &'a mut Scene,
    terminal: &'a mut DefaultTerminal,
    runner: RunnerState,
    error: Option<std::io::Error>,
}

impl FrameHooks for FrameDriver<'_> {
    fn before_tick(&mut self, elapsed_ms: f64) {
        self.scene.step(elapsed_ms);
    }

    fn tick(&mut self, _elapsed_ms: f64) {
        let scene = &*self.scene;
        let runner = self.runner;
        if let Err(err) = self.terminal.draw(|frame| scene.render(frame, runner)) {
            self.error = Some(err);
        }
    }
}

/// The main application which holds the state and logic of the application.
struct App {
    /// Is the application running?
    running: bool,
    scene: Scene,
    runner: Runner,
    started: Instant,
}

impl App {
    /// Build the scene from `config`. Every word is built here, so unknown
    /// glyphs and broken signs are reported before the terminal is taken over.
    fn new(config: Config) -> color_eyre::Result<Self> {
        let registry = config.registry().wrap_err("invalid glyph definitions")?;
        let options = config.formation_options();
        let controller = match config.seed {
            Some(seed) => FormationController::with_seed(options, seed),
            None => FormationController::new(options),
        };

        let mut sequencer =
            Sequencer::new(registry, config.word_style(), controller).with_looping(config.looping);
        for (kind, sources) in config.section_sources()? {
            sequencer
                .add_section(kind, &sources)
                .wrap_err_with(|| format!("invalid {kind:?} section"))?;
        }

        let finishes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&finishes);
        let finish = sequencer.on_finish(move |_| counter.set(counter.get() + 1));

        let unit = config.particle_size / 2.0;
        let scene = Scene {
            world: World::new(render::canvas_for(Size::new(80, 24), unit)),
            sequencer,
            unit,
            background: config.background.into(),
            accent: config.color.into(),
            last_report: StepReport::default(),
            frame_ms: 0.0,
            finishes,
            _finish: finish,
        };

        Ok(Self {
            running: false,
            scene,
            runner: Runner::new(config.fps),
            started: Instant::now(),
        })
    }

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Run the application's main loop.
    fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.scene.resize(terminal.size()?);
        self.runner.start(self.now_ms());
        self.scene.next();

        // Poll often enough to never miss a frame by much
        let poll = Duration::from_secs_f64(self.runner.interval() / 4000.0);

        while self.running {
            let now = self.now_ms();
            let mut driver = FrameDriver {
                scene: &mut self.scene,
                terminal: &mut terminal,
                runner: self.runner.state(),
                error: None,
            };
            self.runner.tick(now, &mut driver);
            if let Some(err) = driver.error {
                return Err(err).wrap_err("failed to draw frame");
            }

            if !self.runner.is_running() {
                let state = self.runner.state();
                terminal.draw(|frame| self.scene.render(frame, state))?;
            }

            self.handle_crossterm_events(poll)?;
        }
        Ok(())
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    self.scene.next();
                }
                Event::Resize(width, height) => self.scene.resize(Size::new(width, height)),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ') | KeyCode::Char('n') | KeyCode::Enter) => self.scene.next(),
            (_, KeyCode::Char('p')) => self.toggle_pause(),
            (_, KeyCode::Char('s')) => self.stop(),
            (_, KeyCode::Char('r')) => self.restart(),
            (_, KeyCode::Char('l')) => self.toggle_loop(),
            _ => {}
        }
    }

    fn toggle_pause(&mut self) {
        if self.runner.is_running() {
            self.runner.pause();
        } else {
            self.runner.start(self.now_ms());
        }
    }

    /// Stop the animation and drop every particle.
    fn stop(&mut self) {
        self.runner.stop();
        self.scene.world.clear();
    }

    /// Start over from the first section with an empty pool.
    fn restart(&mut self) {
        self.scene.world.clear();
        self.scene.sequencer.restart();
        self.runner.start(self.now_ms());
        self.scene.next();
    }

    fn toggle_loop(&mut self) {
        let looping = !self.scene.sequencer.looping();
        self.scene.sequencer.set_looping(looping);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
