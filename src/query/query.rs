use thiserror::Error;

use crate::geometry::point::Scalar;
use crate::graph::graph::SafetyNetwork;
use crate::graph::matrix::DistanceMatrix;
use crate::graph::pathfinder::{floyd_warshall_with_paths, reconstruct_path, PathStep};

/// One fuel-limited routing question; airport indices are 0-based.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Query {
    pub source: usize,
    pub destination: usize,
    pub fuel_capacity: Scalar,
}

/// Cheapest way to satisfy a [`Query`]: total distance and every airport
/// touched on the way, including both ends.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub distance: Scalar,
    pub stops: Vec<PathStep>,
}

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("airport index {index} out of range for {count} airports")]
    UnknownAirport { index: usize, count: usize },
}

/// Answers fuel queries against a precomputed [`SafetyNetwork`].
pub struct QueryEngine<'a> {
    network: &'a SafetyNetwork,
}

impl<'a> QueryEngine<'a> {
    pub fn new(network: &'a SafetyNetwork) -> Self {
        QueryEngine { network }
    }

    /// Airport-only graph whose legs are the safe distances flyable on one
    /// tank of `fuel_capacity`.
    pub fn refuel_graph(&self, fuel_capacity: Scalar) -> DistanceMatrix {
        let n = self.network.airport_count();
        let limit = fuel_capacity + self.network.sphere.epsilon;
        let mut graph = DistanceMatrix::disconnected(n);
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let leg = self.network.airport_distance(i, j);
                if leg <= limit {
                    graph[(i, j)] = leg;
                }
            }
        }
        graph
    }

    /// Shortest route with refuelling stops, or `None` when the destination
    /// cannot be reached.
    pub fn shortest_route(&self, query: &Query) -> Result<Option<Route>, QueryError> {
        self.check_airport(query.source)?;
        self.check_airport(query.destination)?;

        let mut graph = self.refuel_graph(query.fuel_capacity);
        let hops = floyd_warshall_with_paths(&mut graph);
        let route = reconstruct_path(&graph, &hops, query.source, query.destination).map(|stops| {
            Route {
                distance: graph[(query.source, query.destination)],
                stops,
            }
        });
        Ok(route)
    }

    pub fn shortest_distance(&self, query: &Query) -> Result<Option<Scalar>, QueryError> {
        Ok(self.shortest_route(query)?.map(|route| route.distance))
    }

    /// Answers `queries` in order.
    pub fn answer_all(&self, queries: &[Query]) -> Result<Vec<Option<Scalar>>, QueryError> {
        queries.iter().map(|q| self.shortest_distance(q)).collect()
    }

    fn check_airport(&self, index: usize) -> Result<(), QueryError> {
        let count = self.network.airport_count();
        if index >= count {
            return Err(QueryError::UnknownAirport { index, count });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::sphere::Sphere;
    use assert_approx_eq::assert_approx_eq;

    fn equator_chain() -> (Sphere, SafetyNetwork) {
        let s = Sphere::new(6370.0, 1e-9);
        let airports = vec![s.point(0.0, 0.0), s.point(0.0, 10.0), s.point(0.0, 20.0)];
        let network = SafetyNetwork::build(s, airports, 600.0);
        (s, network)
    }

    #[test]
    fn same_airport_costs_nothing() {
        let (_, network) = equator_chain();
        let engine = QueryEngine::new(&network);
        let route = engine
            .shortest_route(&Query {
                source: 1,
                destination: 1,
                fuel_capacity: 0.0,
            })
            .unwrap()
            .expect("route");
        assert_eq!(route.distance, 0.0);
        assert_eq!(route.stops.len(), 1);
    }

    #[test]
    fn refuels_at_the_middle_airport() {
        let (s, network) = equator_chain();
        let leg = s.distance(&network.airports[0], &network.airports[1]);
        let engine = QueryEngine::new(&network);

        let route = engine
            .shortest_route(&Query {
                source: 0,
                destination: 2,
                fuel_capacity: leg + 50.0,
            })
            .unwrap()
            .expect("route");
        assert_approx_eq!(route.distance, 2.0 * leg, 1e-6);
        let ids: Vec<usize> = route.stops.iter().map(|s| s.airport_index).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_approx_eq!(route.stops[1].cost, leg, 1e-6);
    }

    #[test]
    fn route_stops_add_up_to_its_distance() {
        let (s, network) = equator_chain();
        let leg = s.distance(&network.airports[0], &network.airports[1]);
        let engine = QueryEngine::new(&network);
        for fuel in [leg + 1.0, 1e9] {
            let route = engine
                .shortest_route(&Query {
                    source: 2,
                    destination: 0,
                    fuel_capacity: fuel,
                })
                .unwrap()
                .expect("route");
            assert_eq!(route.stops.first().map(|s| s.airport_index), Some(2));
            let last = route.stops.last().expect("stops");
            assert_eq!(last.airport_index, 0);
            assert_approx_eq!(last.cost, route.distance, 1e-9);
        }
    }

    #[test]
    fn short_tank_is_impossible() {
        let (s, network) = equator_chain();
        let leg = s.distance(&network.airports[0], &network.airports[1]);
        let engine = QueryEngine::new(&network);
        let answer = engine
            .shortest_distance(&Query {
                source: 0,
                destination: 2,
                fuel_capacity: leg - 1.0,
            })
            .unwrap();
        assert_eq!(answer, None);
    }

    #[test]
    fn refuel_graph_only_keeps_reachable_legs() {
        let (s, network) = equator_chain();
        let leg = s.distance(&network.airports[0], &network.airports[1]);
        let graph = QueryEngine::new(&network).refuel_graph(leg + 1.0);
        assert!(graph.is_connected(0, 1));
        assert!(graph.is_connected(2, 1));
        assert!(!graph.is_connected(0, 2));
    }

    #[test]
    fn unknown_airport_is_rejected() {
        let (_, network) = equator_chain();
        let err = QueryEngine::new(&network)
            .shortest_distance(&Query {
                source: 0,
                destination: 3,
                fuel_capacity: 1e6,
            })
            .unwrap_err();
        assert_eq!(err, QueryError::UnknownAirport { index: 3, count: 3 });
    }

    #[test]
    fn answers_in_query_order() {
        let (s, network) = equator_chain();
        let leg = s.distance(&network.airports[0], &network.airports[1]);
        let queries = [
            Query {
                source: 0,
                destination: 1,
                fuel_capacity: leg + 1.0,
            },
            Query {
                source: 0,
                destination: 2,
                fuel_capacity: 10.0,
            },
        ];
        let answers = QueryEngine::new(&network).answer_all(&queries).unwrap();
        assert_eq!(answers.len(), 2);
        assert_approx_eq!(answers[0].unwrap(), leg, 1e-6);
        assert!(answers[1].is_none());
    }
}
