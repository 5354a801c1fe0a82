use hecs::World;

use crate::render::{ball_redraw_box, draw_scene, paddle_redraw_box, ScoreLayout};
use crate::{
    create_ball, create_paddle, step, Arena, Ball, Config, ConfigError, EventSource, Events,
    HostEvent, InputProvider, Key, Paddle, Rect, Score, Side, Surface, TextProvider,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Drain the event queue; true if it held a close or the quit key
pub fn quit_requested<E: EventSource + ?Sized>(events: &mut E, quit_key: Key) -> bool {
    let mut quit = false;
    while let Some(event) = events.poll_event() {
        match event {
            HostEvent::Quit => quit = true,
            HostEvent::KeyDown(key) if key == quit_key => quit = true,
            HostEvent::KeyDown(_) => {}
        }
    }
    quit
}

/// One match: owns the entities, score and config for its whole lifetime
pub struct Match {
    world: World,
    config: Config,
    arena: Arena,
    score: Score,
    events: Events,
    tick: u64,
}

impl Match {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let arena = Arena::from_config(&config);
        let mut world = World::new();
        for side in Side::BOTH {
            create_paddle(&mut world, side, &config);
        }
        create_ball(&mut world, Ball::serve(&config));

        log::info!(
            "Match started: arena {}x{}, ball r={} v=({}, {})",
            arena.width,
            arena.height,
            config.ball_radius,
            config.ball_speed_x,
            config.ball_speed_y
        );

        Ok(Self {
            world,
            config,
            arena,
            score: Score::new(),
            events: Events::new(),
            tick: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Events from the most recent tick
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Paddles ordered left then right
    pub fn paddles(&self) -> Vec<Paddle> {
        let mut paddles: Vec<Paddle> = self
            .world
            .query::<&Paddle>()
            .iter()
            .map(|(_e, paddle)| *paddle)
            .collect();
        paddles.sort_by_key(|p| p.side);
        paddles
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.paddles().into_iter().find(|p| p.side == side)
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, ball)| *ball)
    }

    /// Whether the surface's logical size matches the arena
    pub fn fits_surface<S: Surface>(&self, surface: &S) -> bool {
        surface.width() as f32 == self.arena.width && surface.height() as f32 == self.arena.height
    }

    /// Advance the simulation one tick without drawing.
    ///
    /// Returns true when the tick ended a round.
    pub fn update<I: InputProvider + ?Sized>(&mut self, input: &I) -> bool {
        let ended = step(
            &mut self.world,
            &self.arena,
            &self.config,
            &mut self.score,
            &mut self.events,
            input,
        );
        self.tick += 1;
        ended
    }

    /// Regions that may differ from the previous frame
    pub fn redraw_regions(&self, score_layout: &ScoreLayout) -> Vec<Rect> {
        let mut regions: Vec<Rect> = self
            .paddles()
            .iter()
            .map(|p| paddle_redraw_box(p, self.arena.height, self.config.paddle_padding))
            .collect();
        if let Some(ball) = self.ball() {
            regions.push(ball_redraw_box(&ball));
        }
        regions.push(score_layout.bounds);
        regions
    }

    /// Run one full frame: quit check, draw, tick, present.
    ///
    /// A quit signal is only honoured at the start of a frame.
    pub fn run_frame<S, T, I, E>(
        &mut self,
        surface: &mut S,
        text: &mut T,
        input: &I,
        events: &mut E,
    ) -> FrameOutcome
    where
        S: Surface,
        T: TextProvider<Text = S::Text>,
        I: InputProvider + ?Sized,
        E: EventSource + ?Sized,
    {
        if quit_requested(events, self.config.quit_key) {
            log::info!(
                "Quit after {} ticks, final score {} - {}",
                self.tick,
                self.score.left,
                self.score.right
            );
            return FrameOutcome::Quit;
        }

        let paddles = self.paddles();
        let ball = self.ball();
        let layout = draw_scene(
            surface,
            text,
            &self.config,
            &paddles,
            ball.as_ref(),
            &self.score,
        );

        self.update(input);

        surface.present(&self.redraw_regions(&layout));
        FrameOutcome::Continue
    }

    /// Run frames until the host asks to quit; returns the tick count
    pub fn run<S, T, I, E>(&mut self, surface: &mut S, text: &mut T, input: &I, events: &mut E) -> u64
    where
        S: Surface,
        T: TextProvider<Text = S::Text>,
        I: InputProvider + ?Sized,
        E: EventSource + ?Sized,
    {
        if !self.fits_surface(surface) {
            log::warn!(
                "Surface is {}x{} but arena is {}x{}",
                surface.width(),
                surface.height(),
                self.arena.width,
                self.arena.height
            );
        }
        while self.run_frame(surface, text, input, events) == FrameOutcome::Continue {}
        self.tick
    }
}
