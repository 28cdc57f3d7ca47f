use lambda_runtime::{service_fn, Error, LambdaEvent};
use log::warn;
use once_cell::sync::Lazy;
use safe_flight::config::SolverConfig;
use safe_flight::data::read_network_from_file;
use safe_flight::graph::graph::SafetyNetwork;
use safe_flight::query::query::{Query, QueryEngine};
use safe_flight::Airport;
use serde::{Deserialize, Serialize};

/// Environment variable naming a network file written by `build_network`.
const NETWORK_ENV_VAR: &str = "SAFE_FLIGHT_NETWORK";

static CONFIG: Lazy<SolverConfig> = Lazy::new(|| {
    SolverConfig::from_env().unwrap_or_else(|err| {
        warn!("falling back to default solver config: {err}");
        SolverConfig::default()
    })
});

static NETWORK: Lazy<Option<SafetyNetwork>> = Lazy::new(|| {
    let path = std::env::var_os(NETWORK_ENV_VAR)?;
    match read_network_from_file(&path) {
        Ok(network) => Some(network),
        Err(err) => {
            warn!("could not load network from {}: {err}", path.to_string_lossy());
            None
        }
    }
});

#[derive(Debug, Deserialize)]
struct QueryRequest {
    /// 1-based airport indices
    source: usize,
    destination: usize,
    fuel: f64,
}

impl QueryRequest {
    fn to_query(&self) -> Result<Query, String> {
        if self.source == 0 || self.destination == 0 {
            return Err("airport indices are 1-based".into());
        }
        Ok(Query {
            source: self.source - 1,
            destination: self.destination - 1,
            fuel_capacity: self.fuel,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum EngineRequest {
    Solve {
        /// `[lon, lat]` pairs in degrees
        airports: Vec<[f64; 2]>,
        safety_radius: f64,
        queries: Vec<QueryRequest>,
    },
    Route {
        source: usize,
        destination: usize,
        fuel: f64,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum EngineResponse {
    Solve {
        /// `null` where no route exists
        distances: Vec<Option<f64>>,
    },
    Route {
        distance: f64,
        stops: Vec<StopResult>,
    },
    Impossible,
    Error {
        message: String,
    },
}

#[derive(Debug, Serialize)]
struct StopResult {
    airport: usize,
    cumulative_distance: f64,
}

fn solve(airports: &[[f64; 2]], safety_radius: f64, queries: &[QueryRequest]) -> EngineResponse {
    let queries: Result<Vec<Query>, String> = queries.iter().map(QueryRequest::to_query).collect();
    let queries = match queries {
        Ok(queries) => queries,
        Err(message) => return EngineResponse::Error { message },
    };

    let sphere = CONFIG.sphere();
    let positions = airports
        .iter()
        .enumerate()
        .map(|(idx, &[lon, lat])| {
            Airport {
                id: idx as u32 + 1,
                lon,
                lat,
            }
            .position(&sphere)
        })
        .collect();
    let network = SafetyNetwork::build(sphere, positions, safety_radius);

    match QueryEngine::new(&network).answer_all(&queries) {
        Ok(distances) => EngineResponse::Solve { distances },
        Err(err) => EngineResponse::Error {
            message: err.to_string(),
        },
    }
}

fn route(request: &QueryRequest) -> EngineResponse {
    let Some(network) = NETWORK.as_ref() else {
        return EngineResponse::Error {
            message: format!("no precomputed network; set {NETWORK_ENV_VAR}"),
        };
    };
    let query = match request.to_query() {
        Ok(query) => query,
        Err(message) => return EngineResponse::Error { message },
    };

    match QueryEngine::new(network).shortest_route(&query) {
        Ok(Some(route)) => EngineResponse::Route {
            distance: route.distance,
            stops: route
                .stops
                .into_iter()
                .map(|step| StopResult {
                    airport: step.airport_index + 1,
                    cumulative_distance: step.cost,
                })
                .collect(),
        },
        Ok(None) => EngineResponse::Impossible,
        Err(err) => EngineResponse::Error {
            message: err.to_string(),
        },
    }
}

async fn handler(event: LambdaEvent<EngineRequest>) -> Result<EngineResponse, Error> {
    let response = match event.payload {
        EngineRequest::Solve {
            airports,
            safety_radius,
            queries,
        } => solve(&airports, safety_radius, &queries),
        EngineRequest::Route {
            source,
            destination,
            fuel,
        } => route(&QueryRequest {
            source,
            destination,
            fuel,
        }),
    };
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let func = service_fn(handler);
    lambda_runtime::run(func).await
}
