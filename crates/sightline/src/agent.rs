//! Agents: who is looking, and from where.
//!
//! Queries only ever see an agent's origin and look-at target; the role is
//! kept for the caller (colours, selection order) and never changes the math.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::Point;
use crate::scene::SceneBounds;
use crate::GeomError;

/// Selection and clamping radius of an agent disk.
pub const AGENT_RADIUS: f64 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Player,
    Enemy,
    Ally,
}

impl Role {
    pub fn name(self) -> &'static str {
        match self {
            Role::Player => "player",
            Role::Enemy => "enemy",
            Role::Ally => "ally",
        }
    }
}

impl FromStr for Role {
    type Err = GeomError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player" => Ok(Role::Player),
            "enemy" => Ok(Role::Enemy),
            "ally" => Ok(Role::Ally),
            _ => Err(GeomError::unknown("role", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentState {
    pub position: Point,
    pub look_at: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Agent {
    Player(AgentState),
    Enemy(AgentState),
    Ally(AgentState),
}

impl Agent {
    pub fn new(role: Role, position: Point, look_at: Point) -> Self {
        let state = AgentState { position, look_at };
        match role {
            Role::Player => Agent::Player(state),
            Role::Enemy => Agent::Enemy(state),
            Role::Ally => Agent::Ally(state),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Agent::Player(_) => Role::Player,
            Agent::Enemy(_) => Role::Enemy,
            Agent::Ally(_) => Role::Ally,
        }
    }

    #[inline]
    pub fn state(&self) -> &AgentState {
        match self {
            Agent::Player(s) | Agent::Enemy(s) | Agent::Ally(s) => s,
        }
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut AgentState {
        match self {
            Agent::Player(s) | Agent::Enemy(s) | Agent::Ally(s) => s,
        }
    }

    /// Ray origin for this agent's queries.
    #[inline]
    pub fn origin(&self) -> Point {
        self.state().position
    }

    /// Look-at target for this agent's queries.
    #[inline]
    pub fn target(&self) -> Point {
        self.state().look_at
    }

    pub fn look_at(&mut self, target: Point) {
        self.state_mut().look_at = target;
    }

    /// True if `p` lies strictly inside the agent disk.
    #[inline]
    pub fn hit(&self, p: Point) -> bool {
        (p - self.origin()).norm() < AGENT_RADIUS
    }

    /// Move by `delta`, keeping the whole disk inside `bounds`.
    pub fn step(&mut self, delta: Point, bounds: SceneBounds) {
        let s = self.state_mut();
        s.position = bounds.clamp(s.position + delta, AGENT_RADIUS);
    }

    /// Teleport to `p` (clamped like `step`).
    pub fn move_to(&mut self, p: Point, bounds: SceneBounds) {
        self.state_mut().position = bounds.clamp(p, AGENT_RADIUS);
    }
}

/// Replay token for reproducible spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnToken {
    pub seed: u64,
    pub index: u64,
}

impl SpawnToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Agent with position and look-at drawn uniformly from `bounds`.
pub fn spawn_agent(role: Role, bounds: SceneBounds, tok: SpawnToken) -> Agent {
    let mut rng = tok.to_std_rng();
    let mut draw = || Point::new(rng.gen::<f64>() * bounds.width, rng.gen::<f64>() * bounds.height);
    let position = draw();
    let look_at = draw();
    Agent::new(role, position, look_at)
}
