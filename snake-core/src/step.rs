use crate::{agent, food, Episode, EpisodeError};
use snake_types::{Action, EpisodeStatus, Heading, StepReport, TerminationReason};

impl Episode {
    /// Advance the episode by one step under the external decision input.
    ///
    /// Order is binding: heading update, unconditional advance, consumption,
    /// collision, fitness. A collision latches the penalized fitness as the
    /// episode's final value; `update_fitness` never runs after it.
    pub fn step(&mut self, action_index: usize) -> Result<StepReport, EpisodeError> {
        let space = self.config.action_space;
        let Some(action) = space.action(action_index) else {
            return Err(EpisodeError::InvalidAction {
                index: action_index,
                limit: space.len(),
            });
        };

        // Terminal states are absorbing; the latched report keeps being
        // returned without mutating anything.
        if !self.status.is_running() {
            return Ok(self.report());
        }

        self.step += 1;

        if let Some(heading) = heading_for(action) {
            agent::apply_heading(&mut self.agent, heading);
        }
        agent::advance(&mut self.agent, self.arena.cell_size());

        if agent::eat(&mut self.agent, &self.food) {
            self.food.position = food::place_food(
                &self.agent,
                &self.arena,
                &mut self.rng,
                self.config.max_placement_attempts,
            )?;
            self.agent.steps_since_last_food = 0;
        } else {
            self.agent.steps_since_last_food += 1;
        }

        if let Some(reason) = agent::check_collision(&mut self.agent, &self.arena) {
            self.status = EpisodeStatus::Terminated(reason);
            return Ok(self.report());
        }

        agent::update_fitness(&mut self.agent);
        if self.agent.fitness <= self.config.fitness_floor {
            self.status = EpisodeStatus::Terminated(TerminationReason::FitnessFloor);
        } else if let Some(limit) = self.config.stagnation_limit {
            if self.agent.steps_since_last_food > limit {
                self.status = EpisodeStatus::Terminated(TerminationReason::StagnationLimit);
            }
        }

        Ok(self.report())
    }
}

fn heading_for(action: Action) -> Option<Heading> {
    match action {
        Action::Right => Some(Heading::Right),
        Action::Left => Some(Heading::Left),
        Action::Up => Some(Heading::Up),
        Action::Down => Some(Heading::Down),
        Action::Coast => None,
    }
}
