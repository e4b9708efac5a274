//! Rounds and the replay loop
//!
//! A [`Game`] owns the current decision tree and knows when it is stale:
//! the tree is rebuilt from the store before a round whenever the previous
//! round taught the dataset something.

use tracing::{debug, info};
use twenty_engine::interaction::{ask_number, ask_text, ask_yes_no};
use twenty_engine::{knowledge, traverse, DatasetStore, DecisionTree, GuessOrder, Interaction, Result};
use twenty_tree::build_tree;

/// What one round produced, for the replay loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub won: bool,
    pub guesses: u32,
    pub eliminated: Vec<String>,
    /// Whether the dataset was changed and the tree must be rebuilt
    pub updated_dataset: bool,
}

/// Ask the player for up to `max_hints` characteristics of `object`.
pub fn collect_hints<I: Interaction + ?Sized>(
    io: &mut I,
    object: &str,
    max_hints: usize,
) -> Result<Vec<String>> {
    if !ask_yes_no(io, "Would you like to give me a hint?")? {
        return Ok(Vec::new());
    }

    let count = if max_hints <= 1 {
        1
    } else {
        let choices: Vec<String> = (1..=max_hints).map(|n| n.to_string()).collect();
        let prompt = format!("How many hints would you like to give? ({}) ", choices.join("/"));
        ask_number(io, &prompt, 1, max_hints)?
    };

    let mut hints = Vec::with_capacity(count);
    for i in 1..=count {
        let hint = ask_text(io, &format!("Enter hint #{i} (a characteristic of {object}): "))?;
        hints.push(hint);
    }
    Ok(hints)
}

/// Play one round on `tree`, learning from the player on a loss.
pub fn play_round<S, I, O>(
    tree: &DecisionTree,
    store: &S,
    io: &mut I,
    order: &mut O,
    max_hints: usize,
) -> Result<RoundOutcome>
where
    S: DatasetStore + ?Sized,
    I: Interaction + ?Sized,
    O: GuessOrder + ?Sized,
{
    let result = traverse(tree, io, order)?;

    if result.won() {
        io.say(&format!("Good game! I won in {} guesses.", result.guesses))?;
        return Ok(RoundOutcome {
            won: true,
            guesses: result.guesses,
            eliminated: result.eliminated,
            updated_dataset: false,
        });
    }

    io.say("Congratulations, you stumped me!")?;
    let object = ask_text(io, "What was your object? ")?;
    let hints = collect_hints(io, &object, max_hints)?;

    if hints.is_empty() {
        io.say("Okay, I'll try to do better next time!")?;
    } else {
        knowledge::update(store, &object, &hints[..])?;
        io.say(&format!(
            "Thanks for the hints! I'll remember that {object} has these characteristics:"
        ))?;
        for hint in &hints {
            io.say(&format!("- {hint}"))?;
        }
    }
    info!(object = %object, hints = hints.len(), "Round lost");

    Ok(RoundOutcome {
        won: false,
        guesses: result.guesses,
        eliminated: result.eliminated,
        updated_dataset: !hints.is_empty(),
    })
}

/// Tally of a whole session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub rounds: u32,
    pub wins: u32,
}

/// A game session over one dataset store.
pub struct Game<'s, S: ?Sized> {
    store: &'s S,
    tree: DecisionTree,
    needs_rebuild: bool,
    max_hints: usize,
}

impl<'s, S: DatasetStore + ?Sized> Game<'s, S> {
    pub fn new(store: &'s S, max_hints: usize) -> Self {
        Game {
            store,
            tree: DecisionTree::default(),
            needs_rebuild: true,
            max_hints,
        }
    }

    /// Current tree, rebuilt from the store first if stale.
    pub fn tree(&mut self) -> Result<&DecisionTree> {
        if self.needs_rebuild {
            let dataset = self.store.load()?;
            self.tree = build_tree(&dataset);
            self.needs_rebuild = false;
            debug!(nodes = self.tree.len(), "Rebuilt tree");
        }
        Ok(&self.tree)
    }

    /// Play one round
    pub fn play<I, O>(&mut self, io: &mut I, order: &mut O) -> Result<RoundOutcome>
    where
        I: Interaction + ?Sized,
        O: GuessOrder + ?Sized,
    {
        self.tree()?;
        let outcome = play_round(&self.tree, self.store, io, order, self.max_hints)?;
        if outcome.updated_dataset {
            self.needs_rebuild = true;
        }
        Ok(outcome)
    }

    /// Welcome, play rounds until the player declines another, say goodbye.
    ///
    /// Running out of input ends the session like a "no" would.
    pub fn run<I, O>(&mut self, io: &mut I, order: &mut O) -> Result<Summary>
    where
        I: Interaction + ?Sized,
        O: GuessOrder + ?Sized,
    {
        io.say("Welcome to 20 Questions!")?;
        let mut summary = Summary::default();

        loop {
            let again = self.play(io, order).and_then(|outcome| {
                summary.rounds += 1;
                debug!(
                    guesses = outcome.guesses,
                    eliminated = ?outcome.eliminated,
                    "Round finished"
                );
                if outcome.won {
                    summary.wins += 1;
                }
                ask_yes_no(io, "\nWould you like to play again?")
            });
            match again {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) if e.is_input_closed() => {
                    io.say("")?;
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        io.say("\nThanks for playing! Goodbye!")?;
        info!(rounds = summary.rounds, wins = summary.wins, "Session over");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twenty_engine::order::AsListed;
    use twenty_engine::{MemoryStore, ScriptedInteraction};

    const PETS: &str = "Object,Meows,Barks\nCat,1,0\nDog,0,1\n";

    #[test]
    fn test_win_does_not_touch_dataset() {
        let store = MemoryStore::new(PETS);
        let mut game = Game::new(&store, 2);
        let mut io = ScriptedInteraction::new(["no", "yes"]);

        let outcome = game.play(&mut io, &mut AsListed).unwrap();
        assert_eq!(
            outcome,
            RoundOutcome {
                won: true,
                guesses: 2,
                eliminated: vec![],
                updated_dataset: false,
            }
        );
        assert_eq!(io.messages(), &["Good game! I won in 2 guesses."]);
        assert_eq!(store.contents(), PETS);
    }

    #[test]
    fn test_loss_with_hints_updates_store() {
        let store = MemoryStore::new(PETS);
        let mut game = Game::new(&store, 2);
        // Meows? no, Dog? no, then teach Whale
        let mut io = ScriptedInteraction::new([
            "no", "no", "Whale", "yes", "2", "Swims", "Big",
        ]);

        let outcome = game.play(&mut io, &mut AsListed).unwrap();
        assert!(!outcome.won);
        assert!(outcome.updated_dataset);
        assert_eq!(outcome.guesses, 2);
        assert_eq!(outcome.eliminated, vec!["Dog"]);
        assert_eq!(io.prompts()[2], "What was your object? ");
        assert_eq!(
            store.contents(),
            "Object,Meows,Barks,Swims,Big\nCat,1,0,0,0\nDog,0,1,0,0\nWhale,0,0,1,1\n"
        );
        assert!(io
            .messages()
            .iter()
            .any(|m| m == "- Swims"));
    }

    #[test]
    fn test_loss_without_hints_keeps_tree() {
        let store = MemoryStore::new("Object,Swims\nFish,1\n");
        let mut game = Game::new(&store, 2);
        let mut io = ScriptedInteraction::new(["no", "Rock", "no"]);

        let outcome = game.play(&mut io, &mut AsListed).unwrap();
        assert!(!outcome.updated_dataset);
        assert_eq!(outcome.eliminated, vec!["Fish"]);
        assert_eq!(io.messages().last().map(String::as_str), Some("Okay, I'll try to do better next time!"));
        assert_eq!(store.contents(), "Object,Swims\nFish,1\n");
    }

    #[test]
    fn test_learned_object_is_guessed_next_round() {
        let store = MemoryStore::new("Object,Swims\nFish,1\n");
        let mut game = Game::new(&store, 1);
        let mut io = ScriptedInteraction::new([
            // round 1: Fish? no -> teach Whale/Big (max_hints 1 skips the count prompt)
            "no", "Whale", "yes", "Big",
            // round 2: Swims and Big tie, Swims is listed first
            "no", "yes",
        ]);

        game.play(&mut io, &mut AsListed).unwrap();
        let outcome = game.play(&mut io, &mut AsListed).unwrap();
        assert!(outcome.won);
        assert_eq!(outcome.guesses, 2);
        let prompts = io.prompts();
        assert_eq!(prompts[prompts.len() - 2], "Swims? (yes/no) ");
        assert_eq!(prompts[prompts.len() - 1], "Is your object a Whale? (yes/no) ");
    }

    #[test]
    fn test_empty_dataset_round_is_a_loss() {
        let store = MemoryStore::default();
        let mut game = Game::new(&store, 2);
        let mut io = ScriptedInteraction::new(["Fish", "yes", "1", "Swims"]);

        let outcome = game.play(&mut io, &mut AsListed).unwrap();
        assert_eq!(outcome.guesses, 0);
        assert!(outcome.updated_dataset);
        assert_eq!(store.contents(), "Object,Swims\nFish,1\n");
        assert_eq!(io.prompts()[0], "What was your object? ");
    }

    #[test]
    fn test_hint_count_prompt_lists_choices() {
        let mut io = ScriptedInteraction::new(["yes", "4", "1", " Purrs "]);
        let hints = collect_hints(&mut io, "Cat", 3).unwrap();
        assert_eq!(hints, vec!["Purrs"]);
        assert_eq!(io.prompts()[1], "How many hints would you like to give? (1/2/3) ");
        assert_eq!(io.prompts()[3], "Enter hint #1 (a characteristic of Cat): ");
    }

    #[test]
    fn test_run_replays_until_declined() {
        let store = MemoryStore::new(PETS);
        let mut game = Game::new(&store, 2);
        let mut io = ScriptedInteraction::new(["yes", "yes", "yes", "no", "yes", "no"]);

        let summary = game.run(&mut io, &mut AsListed).unwrap();
        assert_eq!(summary, Summary { rounds: 2, wins: 2 });
        assert_eq!(io.messages().first().map(String::as_str), Some("Welcome to 20 Questions!"));
        assert_eq!(io.messages().last().map(String::as_str), Some("\nThanks for playing! Goodbye!"));
    }

    #[test]
    fn test_run_ends_quietly_on_closed_input() {
        let store = MemoryStore::new(PETS);
        let mut game = Game::new(&store, 2);
        let mut io = ScriptedInteraction::new(["yes"]);

        let summary = game.run(&mut io, &mut AsListed).unwrap();
        assert_eq!(summary, Summary::default());
        assert_eq!(io.messages().last().map(String::as_str), Some("\nThanks for playing! Goodbye!"));
    }
}
