//! JSON request and response documents.
//!
//! A request document carries the network description, both settings
//! blocks and a list of queries. Every query yields one response that
//! echoes its `id` as `request_id`; lookups that find nothing answer with
//! `error_message: "not found"`.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{BuildError, BusDescription, StopDescription};
use crate::guide::{BusSummary, StopSummary, TransitGuide};
use crate::planner::{Itinerary, RoutingSettings};
use crate::render::{Diagram, RenderSettings};

/// Errors raised while processing a request document.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The document could not be parsed or the responses could not be written
    #[error("malformed request document: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The described network is inconsistent
    #[error("cannot build transit guide: {0}")]
    Build(#[from] BuildError),
}

/// One entry of `base_requests`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopDescription),
    Bus(BusDescription),
}

/// One entry of `stat_requests`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Stop { id: u64, name: String },
    Bus { id: u64, name: String },
    Route { id: u64, from: String, to: String },
    Map { id: u64 },
}

impl StatRequest {
    pub fn id(&self) -> u64 {
        match self {
            StatRequest::Stop { id, .. }
            | StatRequest::Bus { id, .. }
            | StatRequest::Route { id, .. }
            | StatRequest::Map { id } => *id,
        }
    }
}

/// A complete request document.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestDocument {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
    #[serde(default)]
    pub routing_settings: RoutingSettings,
    #[serde(default)]
    pub render_settings: RenderSettings,
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

impl RequestDocument {
    /// Build the guide described by `base_requests` and the settings.
    pub fn build_guide(&self) -> Result<TransitGuide, BuildError> {
        let mut stops = Vec::new();
        let mut buses = Vec::new();
        for request in &self.base_requests {
            match request {
                BaseRequest::Stop(stop) => stops.push(stop.clone()),
                BaseRequest::Bus(bus) => buses.push(bus.clone()),
            }
        }

        TransitGuide::new(
            stops,
            buses,
            self.routing_settings.clone(),
            self.render_settings.clone(),
        )
    }
}

/// The answer to one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub request_id: u64,
    #[serde(flatten)]
    pub body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Stop(StopSummary),
    Bus(BusSummary),
    Route {
        #[serde(flatten)]
        itinerary: Itinerary,
        map: Diagram,
    },
    Map {
        map: Diagram,
    },
    NotFound {
        error_message: &'static str,
    },
}

impl ResponseBody {
    fn not_found() -> Self {
        ResponseBody::NotFound {
            error_message: "not found",
        }
    }
}

/// Answer a single query.
pub fn process(guide: &TransitGuide, request: &StatRequest) -> Response {
    let body = match request {
        StatRequest::Stop { name, .. } => guide
            .stop(name)
            .map(|summary| ResponseBody::Stop(summary.clone())),
        StatRequest::Bus { name, .. } => guide
            .bus(name)
            .map(|summary| ResponseBody::Bus(summary.clone())),
        StatRequest::Route { from, to, .. } => guide.route(from, to).and_then(|itinerary| {
            let map = guide.route_map(from, to)?;
            Some(ResponseBody::Route { itinerary, map })
        }),
        StatRequest::Map { .. } => Some(ResponseBody::Map { map: guide.map() }),
    };

    Response {
        request_id: request.id(),
        body: body.unwrap_or_else(ResponseBody::not_found),
    }
}

/// Answer every query in order.
pub fn process_all(guide: &TransitGuide, requests: &[StatRequest]) -> Vec<Response> {
    requests
        .iter()
        .map(|request| process(guide, request))
        .collect()
}

/// Read a request document from `input` and write the responses to `output`.
pub fn run<R: Read, W: Write>(input: R, mut output: W) -> Result<(), RequestError> {
    let document: RequestDocument = serde_json::from_reader(input)?;
    debug!(
        base_requests = document.base_requests.len(),
        stat_requests = document.stat_requests.len(),
        "parsed request document"
    );

    let guide = document.build_guide()?;
    let responses = process_all(&guide, &document.stat_requests);
    serde_json::to_writer_pretty(&mut output, &responses)?;
    writeln!(output)?;
    output.flush()?;

    info!(responses = responses.len(), "answered stat requests");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;
    use serde_json::json;

    const DOCUMENT: &str = r#"{
        "routing_settings": {"bus_wait_time": 5, "bus_velocity": 36},
        "render_settings": {"width": 600, "height": 400, "padding": 50},
        "base_requests": [
            {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0,
             "road_distances": {"B": 1800}},
            {"type": "Stop", "name": "B", "latitude": 0.0, "longitude": 0.0216},
            {"type": "Stop", "name": "Lonely", "latitude": 1.0, "longitude": 1.0},
            {"type": "Bus", "name": "1", "stops": ["A", "B"], "is_roundtrip": true}
        ],
        "stat_requests": [
            {"id": 1, "type": "Stop", "name": "A"},
            {"id": 2, "type": "Stop", "name": "Lonely"},
            {"id": 3, "type": "Stop", "name": "Nowhere"},
            {"id": 4, "type": "Bus", "name": "1"},
            {"id": 5, "type": "Route", "from": "A", "to": "B"},
            {"id": 6, "type": "Route", "from": "B", "to": "A"},
            {"id": 7, "type": "Map"}
        ]
    }"#;

    fn answer(document: &str) -> serde_json::Value {
        let mut output = Vec::new();
        run(document.as_bytes(), &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn answers_every_request_in_order() {
        let responses = answer(DOCUMENT);
        let responses = responses.as_array().unwrap();

        assert_eq!(responses.len(), 7);
        let ids: Vec<u64> = responses
            .iter()
            .map(|r| r["request_id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn stop_responses() {
        let responses = answer(DOCUMENT);
        assert_eq!(responses[0], json!({"request_id": 1, "buses": ["1"]}));
        assert_eq!(responses[1], json!({"request_id": 2, "buses": []}));
        assert_eq!(
            responses[2],
            json!({"request_id": 3, "error_message": "not found"})
        );
    }

    #[test]
    fn bus_response() {
        let responses = answer(DOCUMENT);
        let bus = &responses[3];
        assert_eq!(bus["stop_count"], 2);
        assert_eq!(bus["unique_stop_count"], 2);
        assert_eq!(bus["route_length"], 1800);
        // The road is shorter than the great circle here, so curvature is below 1
        let geodesic = Coordinates::new(0.0, 0.0).distance_to(&Coordinates::new(0.0, 0.0216));
        let curvature = bus["curvature"].as_f64().unwrap();
        assert!((curvature - 1800.0 / geodesic).abs() < 1e-9);
        assert!(curvature < 1.0);
    }

    #[test]
    fn route_responses() {
        let responses = answer(DOCUMENT);
        let route = &responses[4];
        assert_eq!(route["total_time"], 8.0);
        assert_eq!(
            route["items"],
            json!([
                {"type": "Wait", "stop_name": "A", "time": 5.0},
                {"type": "Bus", "bus": "1", "span_count": 1, "time": 3.0}
            ])
        );
        assert!(route["map"]["items"].is_array());

        assert_eq!(
            responses[5],
            json!({"request_id": 6, "error_message": "not found"})
        );
    }

    #[test]
    fn map_response() {
        let responses = answer(DOCUMENT);
        let map = &responses[6]["map"];
        assert_eq!(map["width"], 600.0);
        assert_eq!(map["items"][0]["kind"], "bus_line");
    }

    #[test]
    fn settings_default_when_absent() {
        let responses = answer(r#"{"base_requests": [], "stat_requests": [{"id": 9, "type": "Map"}]}"#);
        assert_eq!(responses[0]["map"]["width"], 1200.0);
    }

    #[test]
    fn malformed_document_is_an_error() {
        let err = run("{".as_bytes(), Vec::new()).unwrap_err();
        assert!(matches!(err, RequestError::Json(_)));

        let err = run(
            r#"{"stat_requests": [{"id": 1, "type": "Teleport"}]}"#.as_bytes(),
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, RequestError::Json(_)));
    }

    #[test]
    fn inconsistent_network_is_an_error() {
        let err = run(
            r#"{"base_requests": [
                {"type": "Bus", "name": "1", "stops": ["Ghost"], "is_roundtrip": true}
            ]}"#
            .as_bytes(),
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot build transit guide: bus 1 references unknown stop Ghost"
        );
    }
}
