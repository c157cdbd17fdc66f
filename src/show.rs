use crate::config::{LaunchPlan, ShowConfig};
use crate::firework::Firework;
use crate::render::{Canvas, Viewport, draw_firework};
use crate::sprite::SpriteAtlas;
use crate::Result;
use crossterm::event::{Event, KeyCode};
use std::io::Write;
use tracing::info;

/// Runs one firework at a time and relaunches it once it burns out.
pub struct FireworkShow {
    plan: LaunchPlan,
    sky: (f64, f64),
    once: bool,
    firework: Firework,
    launches: u32,
    finished: bool,
    canvas: Canvas,
    view: Viewport,
    atlas: SpriteAtlas,
    rng: fastrand::Rng,
    // Twinkle frame picks only, so redraws never advance `rng`
    render_rng: fastrand::Rng,
}

impl FireworkShow {
    pub fn new(config: &ShowConfig, width: usize, height: usize) -> Result<Self> {
        let plan = config.firework.plan()?;
        let canvas = Canvas::new(width, height, config.background());
        let view = Viewport::new(config.sky.width, config.sky.height, &canvas);
        let mut rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let render_rng = rng.fork();

        let show = Self {
            firework: plan.launch(),
            plan,
            sky: (config.sky.width, config.sky.height),
            once: config.once,
            launches: 1,
            finished: false,
            canvas,
            view,
            atlas: SpriteAtlas::new(),
            rng,
            render_rng,
        };
        show.log_launch();
        Ok(show)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.canvas = Canvas::new(width, height, self.canvas.background());
        self.view = Viewport::new(self.sky.0, self.sky.1, &self.canvas);
    }

    fn launch(&mut self) {
        self.firework = self.plan.launch();
        self.launches += 1;
        self.log_launch();
    }

    fn log_launch(&self) {
        info!(
            launch = self.launches,
            charges = self.plan.charges.len(),
            x = self.plan.origin.x,
            y = self.plan.origin.y,
            "firework launched"
        );
    }

    pub fn update(&mut self, dt: f64) {
        if self.finished {
            return;
        }
        self.firework.update(dt, &mut self.rng);

        if self.firework.is_spent() {
            if self.once {
                info!(launches = self.launches, "show finished");
                self.finished = true;
            } else {
                self.launch();
            }
        }
    }

    pub fn render<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        self.canvas.clear();
        draw_firework(
            &mut self.canvas,
            &self.view,
            &mut self.atlas,
            &self.firework,
            &mut self.render_rng,
        );
        self.canvas.present(out)
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = event {
            if key.code == KeyCode::Char(' ') {
                self.finished = false;
                self.launch();
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn firework(&self) -> &Firework {
        &self.firework
    }

    pub fn launches(&self) -> u32 {
        self.launches
    }
}
