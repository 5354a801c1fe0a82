use hecs::World;

use crate::components::*;
use crate::config::KeyBindings;
use crate::host::InputProvider;

/// Sample one player's keys into an intent
pub fn read_intent<I: InputProvider + ?Sized>(input: &I, keys: KeyBindings) -> PaddleIntent {
    PaddleIntent::from_keys(input.is_held(keys.up), input.is_held(keys.down))
}

/// Overwrite every paddle intent with the current key state
pub fn ingest_inputs<I: InputProvider + ?Sized>(world: &mut World, input: &I) {
    for (_entity, (player, intent)) in world.query_mut::<(&Player, &mut PaddleIntent)>() {
        *intent = read_intent(input, player.keys);
    }
}
