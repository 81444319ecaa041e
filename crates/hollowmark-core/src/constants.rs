//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Player ---

/// Player starting lives.
pub const PLAYER_MAX_LIVES: f64 = 3.0;

/// Melee strike range (meters).
pub const MELEE_RANGE: f64 = 1.0;

/// Delay from swing start until the strike connects (seconds).
pub const MELEE_HIT_DELAY_SECS: f64 = 0.3;

/// Total swing duration; another swing cannot start before this elapses.
pub const MELEE_DURATION_SECS: f64 = 0.5;

/// Melee damage dealt to the boss per connected strike.
pub const MELEE_BOSS_DAMAGE: f64 = 1.0;

/// Lives restored per archer killed by melee.
pub const MELEE_KILL_REWARD: f64 = 1.0;

// --- Archers ---

/// Range at which an archer engages the player (meters).
pub const ARCHER_RANGE: f64 = 5.0;

/// Wind-up after the player first enters range before the archer may fire.
pub const ARCHER_INITIAL_DELAY_SECS: f64 = 10.0;

/// Cooldown between shots (seconds).
pub const ARCHER_COOLDOWN_SECS: f64 = 2.0;

/// Delay between the fire decision and the arrow actually launching.
pub const ARCHER_SHOOT_DELAY_SECS: f64 = 0.3;

// --- Arrows ---

/// Arrow flight speed (m/s).
pub const ARROW_SPEED: f64 = 8.0;

/// Arrow lifetime before self-expiry (seconds).
pub const ARROW_LIFETIME_SECS: f64 = 5.0;

/// Arrow damage to the player (lives).
pub const ARROW_DAMAGE: f64 = 1.0;

/// Proximity radius for the arrow-player hit test (meters).
pub const ARROW_HIT_RADIUS: f64 = 0.5;

// --- Boss ---

/// Boss maximum health.
pub const BOSS_MAX_HEALTH: f64 = 100.0;

/// Boss wander speed (m/s).
pub const BOSS_WANDER_SPEED: f64 = 0.8;

/// Shortest wander leg (meters).
pub const BOSS_WANDER_DISTANCE_MIN: f64 = 0.75;

/// Longest wander leg (meters).
pub const BOSS_WANDER_DISTANCE_MAX: f64 = 1.75;

/// Pause on arrival before picking the next destination (seconds).
pub const BOSS_WANDER_PAUSE_SECS: f64 = 0.4;

/// Distance at which a destination counts as reached (meters).
pub const BOSS_WANDER_ARRIVE_DISTANCE: f64 = 0.05;

/// Maximum distance the boss may wander from its spawn point (meters).
pub const BOSS_WANDER_MAX_RADIUS: f64 = 4.0;

/// Spell telegraph duration (seconds).
pub const SPELL_TELEGRAPH_SECS: f64 = 0.75;

/// Spell blast radius (meters).
pub const SPELL_RADIUS: f64 = 1.25;

/// Epsilon added to the radius test to avoid boundary flicker.
pub const SPELL_RADIUS_EPSILON: f64 = 1e-4;

/// Reticle pulse amount as a fraction of base scale.
pub const SPELL_PULSE_AMOUNT: f64 = 0.05;

/// Reticle pulse speed in cycles per second.
pub const SPELL_PULSE_SPEED_HZ: f64 = 1.1;

/// Spell damage to the player (lives).
pub const SPELL_PLAYER_DAMAGE: f64 = 1.0;

/// Spell damage to the boss (health), for boss-targeted casts.
pub const SPELL_BOSS_DAMAGE: f64 = 10.0;

/// Number of explosion effects spawned when a spell resolves.
pub const SPELL_EXPLOSION_COUNT: u32 = 3;

/// Radius of the explosion ring around the blast center (meters).
pub const SPELL_EXPLOSION_RING_RADIUS: f64 = 0.9;

/// Per-explosion angular jitter (radians).
pub const SPELL_EXPLOSION_ANGLE_JITTER: f64 = 0.15;

/// Per-explosion radial jitter (meters).
pub const SPELL_EXPLOSION_RADIAL_JITTER: f64 = 0.15;

/// Extra y-offset above the target's bounds for the telegraph marker.
pub const RETICLE_EXTRA_Y_OFFSET: f64 = 0.15;

/// Fallback y-offset when the target has no usable bounds.
pub const RETICLE_FALLBACK_Y_OFFSET: f64 = 1.0;

/// Radius of the ring on which summoned reinforcements appear (meters).
pub const SUMMON_RING_RADIUS: f64 = 3.0;

// --- Coins ---

/// Pickup radius for coin collection (meters).
pub const COIN_PICKUP_RADIUS: f64 = 0.4;

/// Value of a single coin.
pub const COIN_VALUE: u32 = 1;

// --- Session ---

/// Real-time delay between a terminal outcome and the end screen reveal.
pub const END_SCREEN_DELAY_SECS: f64 = 1.5;
