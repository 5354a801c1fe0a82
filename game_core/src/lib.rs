pub mod arena;
pub mod components;
pub mod config;
pub mod frame;
pub mod headless;
pub mod host;
pub mod params;
pub mod render;
pub mod resources;
pub mod systems;

pub use arena::*;
pub use components::*;
pub use config::*;
pub use frame::*;
pub use host::*;
pub use params::*;
pub use resources::*;

use hecs::World;
use systems::*;

/// Run one deterministic Pong tick.
///
/// Returns true when the tick ended a round; in that case paddles and ball
/// were reset instead of moved.
pub fn step<I: InputProvider + ?Sized>(
    world: &mut World,
    arena: &Arena,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    input: &I,
) -> bool {
    // Clear events at start of tick
    events.clear();

    // 1. Sample keys into paddle intents
    ingest_inputs(world, input);

    // 2. Round end takes the place of motion for this tick
    if check_scoring(world, arena, score, events) {
        reset_positions(world, config);
        return true;
    }

    // 3. Move paddles based on intents
    move_paddles(world, arena);

    // 4. Reflect ball off paddles and walls
    check_collisions(world, arena, config, events);

    // 5. Move ball
    move_ball(world);

    false
}

/// Helper to create a paddle entity with its player and intent
pub fn create_paddle(world: &mut World, side: Side, config: &Config) -> hecs::Entity {
    world.spawn((
        Paddle::new(side, config),
        Player::new(side, config),
        PaddleIntent::default(),
    ))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, ball: Ball) -> hecs::Entity {
    world.spawn((ball,))
}
