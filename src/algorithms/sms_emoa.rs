//! SMS-EMOA driver
//!
//! A steady-state multi-objective optimizer: each iteration breeds one
//! offspring from tournament-selected parents and hands it, together with
//! the current population, to the [`EnvironmentalSelector`] which drops a
//! single individual.
//!
//! Reference: Beume, N., Naujoks, B., & Emmerich, M. (2007). SMS-EMOA:
//! Multiobjective selection based on dominated hypervolume.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::algorithms::environmental::{EnvironmentalSelector, SelectionMethod};
use crate::error::{EvoResult, EvolutionError, OperatorError};
use crate::fitness::traits::{Direction, Problem};
use crate::genome::variable::sample_genome;
use crate::operators::selection::TournamentSelector;
use crate::operators::traits::{ParentSelector, Variator};
use crate::operators::variation::default_variator;
use crate::pareto::ranking::non_dominated_sort;
use crate::population::archive::Archive;
use crate::population::individual::Individual;
use crate::termination::{EvolutionState, TerminationCriterion};

/// Configuration for SMS-EMOA
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsEmoaConfig {
    /// Population size kept after every selection
    pub population_size: usize,
    /// Competitors per parent tournament
    pub tournament_size: usize,
    /// Boundary truncation rule
    pub selection_method: SelectionMethod,
    /// Record every accepted population in an archive
    pub archive: bool,
}

impl Default for SmsEmoaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            tournament_size: 2,
            selection_method: SelectionMethod::DominanceCount,
            archive: false,
        }
    }
}

impl SmsEmoaConfig {
    /// Check the settings for values the driver cannot run with
    pub fn validate(&self) -> EvoResult<()> {
        if self.population_size == 0 {
            return Err(EvolutionError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(EvolutionError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for SmsEmoa
pub struct SmsEmoaBuilder<P> {
    config: SmsEmoaConfig,
    problem: Option<P>,
    variator: Option<Box<dyn Variator>>,
    archive: Option<Archive>,
}

impl<P: Problem> SmsEmoaBuilder<P> {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::from_config(SmsEmoaConfig::default())
    }

    /// Start from an existing configuration
    pub fn from_config(config: SmsEmoaConfig) -> Self {
        Self {
            config,
            problem: None,
            variator: None,
            archive: None,
        }
    }

    /// Set the problem to optimize
    pub fn problem(mut self, problem: P) -> Self {
        self.problem = Some(problem);
        self
    }

    /// Set the population size
    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population_size = size;
        self
    }

    /// Set the parent tournament size
    pub fn tournament_size(mut self, size: usize) -> Self {
        self.config.tournament_size = size;
        self
    }

    /// Set the boundary truncation rule
    pub fn selection_method(mut self, method: SelectionMethod) -> Self {
        self.config.selection_method = method;
        self
    }

    /// Enable or disable the archive
    pub fn archive(mut self, enabled: bool) -> Self {
        self.config.archive = enabled;
        self
    }

    /// Record accepted populations in an existing archive
    pub fn shared_archive(mut self, archive: Archive) -> Self {
        self.config.archive = true;
        self.archive = Some(archive);
        self
    }

    /// Set the variation operator
    ///
    /// Without one, SBX with polynomial mutation is derived from the
    /// problem's variable types when the driver is built.
    pub fn variator<V: Variator + 'static>(mut self, variator: V) -> Self {
        self.variator = Some(Box::new(variator));
        self
    }

    /// Build the SmsEmoa instance
    pub fn build(self) -> EvoResult<SmsEmoa<P>> {
        self.config.validate()?;

        let problem = self.problem.ok_or_else(|| {
            EvolutionError::Configuration("Problem must be specified".to_string())
        })?;
        if problem.num_objectives() == 0 {
            return Err(EvolutionError::Configuration(
                "Problem must define at least one objective".to_string(),
            ));
        }
        if problem.num_variables() == 0 {
            return Err(EvolutionError::Configuration(
                "Problem must define at least one variable".to_string(),
            ));
        }

        let variator = self
            .variator
            .unwrap_or_else(|| default_variator(problem.variable_types()));
        if variator.arity() == 0 {
            return Err(OperatorError::InvalidConfiguration(
                "Variator must consume at least one parent".to_string(),
            )
            .into());
        }

        let directions = problem.directions().to_vec();
        let mut selector =
            EnvironmentalSelector::new(directions.clone(), self.config.selection_method);
        if self.config.archive {
            selector = selector.with_archive(self.archive.unwrap_or_default());
        }

        Ok(SmsEmoa {
            parents: TournamentSelector::new(self.config.tournament_size, directions),
            config: self.config,
            problem,
            variator,
            selector,
            population: Vec::new(),
            evaluations: 0,
            generation: 0,
        })
    }
}

impl<P: Problem> Default for SmsEmoaBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of [`SmsEmoa::run`]
#[derive(Clone, Debug)]
pub struct RunResult {
    /// Final population
    pub population: Vec<Individual>,
    /// Archive contents, when an archive is configured
    pub archive: Option<Vec<Individual>>,
    /// Steady-state iterations performed
    pub generations: usize,
    /// Objective evaluations performed
    pub evaluations: usize,
    /// Why the run stopped
    pub termination_reason: &'static str,
}

impl RunResult {
    /// Archive contents when present, otherwise the final population
    pub fn result(&self) -> &[Individual] {
        self.archive.as_deref().unwrap_or(&self.population)
    }
}

/// Steady-state SMS-EMOA
pub struct SmsEmoa<P: Problem> {
    config: SmsEmoaConfig,
    problem: P,
    variator: Box<dyn Variator>,
    parents: TournamentSelector,
    selector: EnvironmentalSelector,
    population: Vec<Individual>,
    evaluations: usize,
    generation: usize,
}

impl<P: Problem> SmsEmoa<P> {
    /// Create a builder for SmsEmoa
    pub fn builder() -> SmsEmoaBuilder<P> {
        SmsEmoaBuilder::new()
    }

    /// Run with the default configuration
    pub fn new(problem: P) -> EvoResult<Self> {
        Self::builder().problem(problem).build()
    }

    /// Initialize on the first call, otherwise perform one iteration
    pub fn step<R: RngCore>(&mut self, rng: &mut R) -> EvoResult<()> {
        if self.population.is_empty() {
            self.initialize(rng)
        } else {
            self.iterate(rng)
        }
    }

    /// Step until `termination` holds
    ///
    /// The initial population is created first if needed, so the criterion
    /// always sees an evaluated population.
    pub fn run<T, R>(&mut self, termination: &T, rng: &mut R) -> EvoResult<RunResult>
    where
        T: TerminationCriterion + ?Sized,
        R: RngCore,
    {
        let _span = tracing::info_span!(
            "sms_emoa",
            problem = self.problem.name(),
            population_size = self.config.population_size,
            method = ?self.config.selection_method,
        )
        .entered();

        if self.population.is_empty() {
            self.initialize(rng)?;
        }

        loop {
            let state = EvolutionState {
                generation: self.generation,
                evaluations: self.evaluations,
                population: &self.population,
            };
            if termination.should_terminate(&state) {
                break;
            }
            self.iterate(rng)?;
        }

        tracing::info!(
            generations = self.generation,
            evaluations = self.evaluations,
            reason = termination.reason(),
            "run finished"
        );

        Ok(RunResult {
            population: self.population.clone(),
            archive: self.archive().map(Archive::snapshot),
            generations: self.generation,
            evaluations: self.evaluations,
            termination_reason: termination.reason(),
        })
    }

    fn initialize<R: RngCore>(&mut self, rng: &mut R) -> EvoResult<()> {
        let types = self.problem.variable_types();
        let mut population = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            population.push(Individual::new(sample_genome(types, rng)?));
        }
        for individual in &mut population {
            self.evaluate(individual)?;
        }

        if let Some(archive) = self.selector.archive() {
            archive.extend(&population);
        }
        self.population = population;

        tracing::info!(
            population_size = self.population.len(),
            evaluations = self.evaluations,
            "population initialized"
        );
        Ok(())
    }

    fn iterate<R: RngCore>(&mut self, rng: &mut R) -> EvoResult<()> {
        let arity = self.variator.arity();
        let parents: Vec<Individual> = self
            .parents
            .select(arity, &self.population, rng)
            .into_iter()
            .map(|i| self.population[i].clone())
            .collect();

        let mut children = self
            .variator
            .evolve(&parents, self.problem.variable_types(), rng)?;
        if children.is_empty() {
            return Err(OperatorError::InvalidConfiguration(
                "Variator produced no offspring".to_string(),
            )
            .into());
        }
        let pick = rng.gen_range(0..children.len());
        let mut child = children.swap_remove(pick);

        if !child.is_evaluated() {
            child.birth_generation = self.generation + 1;
            self.evaluate(&mut child)?;
        }

        self.population = self.selector.select(
            vec![child],
            self.population.clone(),
            self.config.population_size,
        )?;
        self.generation += 1;
        Ok(())
    }

    fn evaluate(&mut self, individual: &mut Individual) -> EvoResult<()> {
        let objectives = self.problem.evaluate(&individual.genome);
        if objectives.len() != self.problem.num_objectives() {
            return Err(EvolutionError::DataInconsistency(format!(
                "Problem '{}' returned {} objectives, expected {}",
                self.problem.name(),
                objectives.len(),
                self.problem.num_objectives()
            )));
        }
        individual.set_objectives(objectives);
        self.evaluations += 1;
        Ok(())
    }

    /// Archive contents when an archive is configured, otherwise the population
    pub fn result(&self) -> Vec<Individual> {
        match self.archive() {
            Some(archive) => archive.snapshot(),
            None => self.population.clone(),
        }
    }

    /// Non-dominated members of the current population
    pub fn pareto_front(&self) -> Vec<&Individual> {
        let values: Vec<&[f64]> = self
            .population
            .iter()
            .map(|ind| ind.objectives.as_slice())
            .collect();
        non_dominated_sort(&values, self.directions())
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|i| &self.population[i])
            .collect()
    }

    /// Current population
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Attached archive, if any
    pub fn archive(&self) -> Option<&Archive> {
        self.selector.archive()
    }

    /// Objective evaluations performed so far
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Steady-state iterations performed so far
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Objective directions of the problem
    pub fn directions(&self) -> &[Direction] {
        self.problem.directions()
    }

    /// Active configuration
    pub fn config(&self) -> &SmsEmoaConfig {
        &self.config
    }

    /// The problem being optimized
    pub fn problem(&self) -> &P {
        &self.problem
    }
}
