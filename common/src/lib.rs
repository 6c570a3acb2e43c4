mod team_analysis;
pub use team_analysis::{HeroAggregate, PlayerAggregate, Summary, TeamAggregate};
