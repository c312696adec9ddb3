use std::time::Instant;

use crate::models::{Action, ActionResult};

use super::{catalog::Catalog, commands, queries, recommendations, OPERATION_NOT_DEFINED};

/// Runs an ordered action list against one catalog
#[derive(Debug)]
pub struct ActionDispatcher {
    catalog: Catalog,
    actions: Vec<Action>,
}

impl ActionDispatcher {
    pub fn new(catalog: Catalog, actions: Vec<Action>) -> Self {
        Self { catalog, actions }
    }

    /// Executes every action once, in order, and returns one result per action.
    ///
    /// A failing action renders its error message; later actions still run.
    pub fn run(&mut self) -> Vec<ActionResult> {
        let start = Instant::now();
        tracing::info!(action_count = self.actions.len(), "Running actions");

        let catalog = &mut self.catalog;
        let results: Vec<ActionResult> = self
            .actions
            .iter()
            .map(|action| {
                tracing::debug!(action_id = action.id(), kind = action.kind(), "Executing action");
                ActionResult {
                    id: action.id(),
                    message: execute(catalog, action),
                }
            })
            .collect();

        tracing::info!(
            action_count = results.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Actions completed"
        );

        results
    }

    /// Runs the actions and hands back the final catalog state
    pub fn into_results(mut self) -> (Vec<ActionResult>, Catalog) {
        let results = self.run();
        (results, self.catalog)
    }
}

/// Executes a single action against the catalog
pub fn execute(catalog: &mut Catalog, action: &Action) -> String {
    match action {
        Action::Command(command) => commands::execute(catalog, command),
        Action::Query(query) => queries::execute(catalog, query),
        Action::Recommendation(recommendation) => recommendations::execute(catalog, recommendation),
        Action::Undefined { id, description } => {
            tracing::warn!(action_id = id, description = %description, "Undefined action");
            OPERATION_NOT_DEFINED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Command, CommandKind, Criterion, ObjectType, Query, QueryFilters, Recommendation,
        SortOrder, Strategy, Tier,
    };
    use crate::services::catalog::test_support::*;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![],
            vec![user("ann", Tier::Premium, &[], &[])],
            vec![
                movie("Matrix", 1999, &["Action"], 136, &[]),
                movie("Titanic", 1997, &["Drama"], 195, &[]),
            ],
        )
        .unwrap()
    }

    fn command(id: u32, kind: CommandKind) -> Action {
        Action::Command(Command {
            id,
            username: "ann".to_string(),
            title: "Matrix".to_string(),
            kind,
        })
    }

    #[test]
    fn test_actions_run_in_order_and_see_earlier_mutations() {
        let actions = vec![
            command(1, CommandKind::Favorite),
            command(2, CommandKind::View),
            command(
                3,
                CommandKind::Rating {
                    grade: 5.0,
                    season_number: 0,
                },
            ),
            Action::Query(Query {
                id: 4,
                object_type: ObjectType::Movies,
                criterion: Criterion::Ratings,
                sort_order: SortOrder::Asc,
                limit: 0,
                filters: QueryFilters::default(),
            }),
            Action::Recommendation(Recommendation {
                id: 5,
                strategy: Strategy::Standard,
                username: "ann".to_string(),
                genre: None,
            }),
            Action::Undefined {
                id: 6,
                description: "teleport".to_string(),
            },
        ];

        let mut dispatcher = ActionDispatcher::new(catalog(), actions);
        let results = dispatcher.run();

        let messages: Vec<&str> = results.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "error -> Matrix is not seen",
                "success -> Matrix was viewed with total views of 1",
                "success -> Matrix was rated with 5.0 by ann",
                "Query result: [Matrix]",
                "StandardRecommendation result: Titanic",
                "operation not defined",
            ]
        );
        let ids: Vec<u32> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_empty_action_list() {
        let (results, catalog) = ActionDispatcher::new(catalog(), vec![]).into_results();
        assert!(results.is_empty());
        assert_eq!(catalog.videos().len(), 2);
    }
}
