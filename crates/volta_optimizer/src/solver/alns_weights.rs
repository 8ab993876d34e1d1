use std::fmt::{Debug, Display};

use rand::{Rng, seq::IndexedRandom};
use serde::Serialize;

/// Closed family of ALNS operators with a dense index used as scoreboard slot.
pub trait AlnsOperator: Copy + Eq + Debug + Display {
    const COUNT: usize;

    fn index(&self) -> usize;
}

/// Reward tier earned by an accepted candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreTier {
    NewBest,
    Improved,
    AcceptedWorse,
}

#[derive(Debug, Clone, Serialize)]
pub struct Operator<S> {
    pub strategy: S,
    pub weight: f64,
    pub segment_reward: f64,
    pub segment_uses: usize,
}

impl<S> Operator<S> {
    fn update_weight(&mut self, reaction_factor: f64) {
        if self.segment_uses > 0 {
            self.weight = (1.0 - reaction_factor) * self.weight
                + reaction_factor * (self.segment_reward / self.segment_uses as f64);
        }

        self.segment_reward = 0.0;
        self.segment_uses = 0;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AlnsWeights<S>
where
    S: AlnsOperator,
{
    operators: Vec<Operator<S>>,

    #[serde(skip)]
    slots: Vec<Option<usize>>,
}

impl<S> Display for AlnsWeights<S>
where
    S: AlnsOperator,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{:<40} {:>10} {:>10} {:>6}", "Operator", "Weight", "Reward", "Uses")?;
        writeln!(f, "{:-<70}", "")?;
        for operator in &self.operators {
            writeln!(
                f,
                "{:<40} {:>10.4} {:>10.2} {:>6}",
                operator.strategy.to_string(),
                operator.weight,
                operator.segment_reward,
                operator.segment_uses
            )?;
        }
        Ok(())
    }
}

impl<S> AlnsWeights<S>
where
    S: AlnsOperator,
{
    /// Duplicated strategies are kept once.
    pub fn new(strategies: Vec<S>) -> Self {
        let mut slots = vec![None; S::COUNT];
        let mut operators = Vec::with_capacity(strategies.len());

        for strategy in strategies {
            let slot = &mut slots[strategy.index()];
            if slot.is_some() {
                continue;
            }

            *slot = Some(operators.len());
            operators.push(Operator {
                strategy,
                weight: 1.0,
                segment_reward: 0.0,
                segment_uses: 0,
            });
        }

        AlnsWeights { operators, slots }
    }

    pub fn operators(&self) -> &[Operator<S>] {
        &self.operators
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    fn operator(&self, strategy: S) -> Option<&Operator<S>> {
        self.slots[strategy.index()].map(|slot| &self.operators[slot])
    }

    pub fn weight(&self, strategy: S) -> Option<f64> {
        self.operator(strategy).map(|operator| operator.weight)
    }

    /// Roulette-wheel draw over the current weights.
    pub fn select_strategy<R>(&self, rng: &mut R) -> S
    where
        R: Rng,
    {
        assert!(!self.operators.is_empty(), "no operator configured");

        self.operators
            .choose_weighted(rng, |operator| operator.weight)
            .map(|operator| operator.strategy)
            .unwrap_or(self.operators[0].strategy)
    }

    /// Counts one use of `strategy` and adds `reward` to its segment.
    pub fn record(&mut self, strategy: S, reward: f64) {
        if let Some(slot) = self.slots[strategy.index()] {
            let operator = &mut self.operators[slot];
            operator.segment_uses += 1;
            operator.segment_reward += reward;
        }
    }

    /// Smooths every used operator towards its average segment reward, then
    /// starts a new segment.
    pub fn update_weights(&mut self, reaction_factor: f64) {
        for operator in self.operators.iter_mut() {
            operator.update_weight(reaction_factor);
        }
    }
}
