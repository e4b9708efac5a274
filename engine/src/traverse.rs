//! Interactive tree traversal
//!
//! The walk is an explicit state machine. Each step either asks one question
//! through the [`Interaction`] boundary or moves to the next state without
//! asking anything:
//!
//!   At(node)   question node: ask, move to the matching child
//!              leaf: queue its non-eliminated candidates for guessing
//!              nothing left beneath: go to DeadEnd
//!   Guessing   ask "Is your object a X?" for each queued name; a dry
//!              queue ends the round as a loss
//!   DeadEnd    queue every object reachable from the root not yet eliminated
//!   Finished   return the outcome
//!
//! Every prompt (attribute questions included) counts as one guess. A "no"
//! to a direct guess appends that name to the eliminated list.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::error::Result;
use crate::interaction::{ask_yes_no, Interaction};
use crate::node::{DecisionTree, Node};
use crate::order::GuessOrder;

/// Announcement made when nothing is left beneath the current position
pub const DEAD_END_MESSAGE: &str = "I'm out of ideas! Let me try guessing from all objects...";

/// Outcome of one walk through the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    /// Object confirmed by the player, if any
    pub winner: Option<String>,
    /// Prompts asked, attribute questions included
    pub guesses: u32,
    /// Names ruled out by a "no", in the order they were guessed
    pub eliminated: Vec<String>,
}

impl Traversal {
    pub fn won(&self) -> bool {
        self.winner.is_some()
    }
}

enum State<'t> {
    At(&'t Node),
    Guessing(VecDeque<String>),
    DeadEnd,
    Finished(Option<String>),
}

/// Walks one tree for one round.
pub struct Traverser<'t, O: ?Sized> {
    tree: &'t DecisionTree,
    order: &'t mut O,
    guesses: u32,
    eliminated: Vec<String>,
}

impl<'t, O: GuessOrder + ?Sized> Traverser<'t, O> {
    pub fn new(tree: &'t DecisionTree, order: &'t mut O) -> Self {
        Traverser {
            tree,
            order,
            guesses: 0,
            eliminated: Vec::new(),
        }
    }

    /// Run the walk to completion against `io`.
    pub fn run<I: Interaction + ?Sized>(mut self, io: &mut I) -> Result<Traversal> {
        let Some(root) = self.tree.root() else {
            info!("No tree to traverse, conceding the round");
            return Ok(Traversal::default());
        };

        let mut state = State::At(root);
        loop {
            state = match state {
                State::At(node) => self.visit(node, io)?,
                State::Guessing(queue) => self.guess(queue, io)?,
                State::DeadEnd => self.dead_end(root, io)?,
                State::Finished(winner) => {
                    info!(
                        won = winner.is_some(),
                        guesses = self.guesses,
                        eliminated = self.eliminated.len(),
                        "Traversal finished"
                    );
                    return Ok(Traversal {
                        winner,
                        guesses: self.guesses,
                        eliminated: self.eliminated,
                    });
                }
            };
        }
    }

    fn visit<I: Interaction + ?Sized>(&mut self, node: &'t Node, io: &mut I) -> Result<State<'t>> {
        let remaining = self.remaining(node.candidates());
        if remaining.is_empty() {
            debug!("No candidates left beneath the current node");
            return Ok(State::DeadEnd);
        }

        match node {
            Node::Leaf { .. } => {
                let mut names = remaining;
                self.order.arrange(&mut names);
                debug!(candidates = ?names, "Reached leaf");
                Ok(State::Guessing(names.into()))
            }
            Node::Question { attribute, yes, no } => {
                self.guesses += 1;
                let answer = ask_yes_no(io, &format!("{attribute}?"))?;
                debug!(attribute = %attribute, answer, "Question answered");
                Ok(State::At(if answer { &**yes } else { &**no }))
            }
        }
    }

    fn guess<I: Interaction + ?Sized>(
        &mut self,
        mut queue: VecDeque<String>,
        io: &mut I,
    ) -> Result<State<'t>> {
        let Some(name) = queue.pop_front() else {
            return Ok(State::Finished(None));
        };
        if self.is_eliminated(&name) {
            return Ok(State::Guessing(queue));
        }

        self.guesses += 1;
        if ask_yes_no(io, &format!("Is your object a {name}?"))? {
            return Ok(State::Finished(Some(name)));
        }
        self.eliminated.push(name);
        Ok(State::Guessing(queue))
    }

    fn dead_end<I: Interaction + ?Sized>(&mut self, root: &'t Node, io: &mut I) -> Result<State<'t>> {
        let mut names = self.remaining(root.candidates());
        if names.is_empty() {
            return Ok(State::Finished(None));
        }
        io.say(DEAD_END_MESSAGE)?;
        self.order.arrange(&mut names);
        debug!(candidates = ?names, "Falling back to every remaining object");
        Ok(State::Guessing(names.into()))
    }

    fn remaining(&self, candidates: Vec<&str>) -> Vec<String> {
        candidates
            .into_iter()
            .filter(|name| !self.is_eliminated(name))
            .map(str::to_string)
            .collect()
    }

    fn is_eliminated(&self, name: &str) -> bool {
        self.eliminated.iter().any(|e| e == name)
    }
}

/// Walk `tree` once, asking through `io` and ordering guesses with `order`.
pub fn traverse<I, O>(tree: &DecisionTree, io: &mut I, order: &mut O) -> Result<Traversal>
where
    I: Interaction + ?Sized,
    O: GuessOrder + ?Sized,
{
    Traverser::new(tree, order).run(io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{ScriptedInteraction, YES_NO_REPROMPT};
    use crate::order::{AsListed, Reversed};

    fn cat_dog() -> DecisionTree {
        DecisionTree::new(Some(Node::question(
            "Meows",
            Node::leaf(["Cat"]),
            Node::leaf(["Dog"]),
        )))
    }

    fn pets() -> DecisionTree {
        DecisionTree::new(Some(Node::question(
            "Meows",
            Node::leaf(["Cat"]),
            Node::question("Barks", Node::leaf(["Dog"]), Node::leaf(["Fish", "Eel"])),
        )))
    }

    #[test]
    fn test_question_then_guess_wins() {
        let mut io = ScriptedInteraction::new(["yes", "yes"]);
        let result = traverse(&cat_dog(), &mut io, &mut AsListed).unwrap();

        assert_eq!(result.winner.as_deref(), Some("Cat"));
        assert_eq!(result.guesses, 2);
        assert!(result.eliminated.is_empty());
        assert_eq!(io.prompts(), &["Meows? (yes/no) ", "Is your object a Cat? (yes/no) "]);
    }

    #[test]
    fn test_single_leaf_guesses_immediately() {
        let tree = DecisionTree::new(Some(Node::leaf(["Fish"])));
        let mut io = ScriptedInteraction::new(["yes"]);
        let result = traverse(&tree, &mut io, &mut AsListed).unwrap();

        assert!(result.won());
        assert_eq!(result.guesses, 1);
        assert_eq!(io.prompts()[0], "Is your object a Fish? (yes/no) ");
    }

    #[test]
    fn test_empty_tree_concedes_without_asking() {
        let mut io = ScriptedInteraction::new(Vec::<String>::new());
        let result = traverse(&DecisionTree::default(), &mut io, &mut AsListed).unwrap();

        assert_eq!(result, Traversal::default());
        assert!(io.prompts().is_empty());
    }

    #[test]
    fn test_exhaustive_loss_eliminates_everything_once() {
        let tree = DecisionTree::new(Some(Node::leaf(["Fish", "Eel", "Newt"])));
        let mut io = ScriptedInteraction::new(["no", "no", "no"]);
        let result = traverse(&tree, &mut io, &mut AsListed).unwrap();

        assert_eq!(result.winner, None);
        assert_eq!(result.guesses, 3);
        assert_eq!(result.eliminated, vec!["Fish", "Eel", "Newt"]);
        assert!(io.messages().is_empty());
        assert_eq!(io.remaining(), 0);
    }

    #[test]
    fn test_exhausted_leaf_ends_the_round() {
        let mut io = ScriptedInteraction::new(["yes", "no", "yes"]);
        let result = traverse(&pets(), &mut io, &mut AsListed).unwrap();

        assert_eq!(result.winner, None);
        assert_eq!(result.guesses, 2);
        assert_eq!(result.eliminated, vec!["Cat"]);
        assert_eq!(io.prompts().len(), 2);
        assert!(io.messages().is_empty());
        assert_eq!(io.remaining(), 1);
    }

    #[test]
    fn test_dead_end_falls_back_to_every_object() {
        // the yes side holds no candidates, so nothing remains beneath it
        let tree = DecisionTree::new(Some(Node::question(
            "Meows",
            Node::leaf(Vec::<String>::new()),
            Node::question("Barks", Node::leaf(["Dog"]), Node::leaf(["Fish"])),
        )));
        let mut io = ScriptedInteraction::new(["yes", "no", "yes"]);
        let result = traverse(&tree, &mut io, &mut AsListed).unwrap();

        assert_eq!(result.winner.as_deref(), Some("Fish"));
        assert_eq!(result.guesses, 3);
        assert_eq!(result.eliminated, vec!["Dog"]);
        assert_eq!(io.messages(), &[DEAD_END_MESSAGE]);
        assert_eq!(io.prompts()[2], "Is your object a Fish? (yes/no) ");
    }

    #[test]
    fn test_leaf_order_comes_from_provider() {
        let mut io = ScriptedInteraction::new(["no", "no", "yes"]);
        let result = traverse(&pets(), &mut io, &mut Reversed).unwrap();

        assert_eq!(result.winner.as_deref(), Some("Eel"));
        assert_eq!(io.prompts()[2], "Is your object a Eel? (yes/no) ");
    }

    #[test]
    fn test_unrecognized_answers_are_not_counted() {
        let mut io = ScriptedInteraction::new(["perhaps", "YES", "nope", " yes "]);
        let result = traverse(&cat_dog(), &mut io, &mut AsListed).unwrap();

        assert_eq!(result.guesses, 2);
        assert_eq!(io.prompts()[1], YES_NO_REPROMPT);
        assert!(result.won());
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut io = ScriptedInteraction::new(["no"]);
        let err = traverse(&pets(), &mut io, &mut AsListed).unwrap_err();
        assert!(err.is_input_closed());
    }
}
