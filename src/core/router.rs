//! Predicate-based log routing
//!
//! Routes are a secondary, additive delivery path: every rule's predicate is
//! evaluated against every incoming event, independent of the primary sink
//! chain and of level gating. A failing predicate or sink is isolated with
//! `catch_unwind` and reported to the diagnostic side channel so one bad
//! rule can never starve the rest.

use super::fallback;
use super::log_event::LogEvent;
use crate::sinks::Sink;
use std::panic::{catch_unwind, AssertUnwindSafe};

type RoutePredicate = Box<dyn Fn(&LogEvent) -> bool + Send + Sync>;

struct RouteRule {
    predicate: RoutePredicate,
    sink: Box<dyn Sink>,
}

/// Ordered predicate→sink rules, evaluated best-effort per event
#[derive(Default)]
pub struct LogRouter {
    routes: Vec<RouteRule>,
}

impl LogRouter {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Append a rule; rules run in registration order
    pub fn add_route<P>(&mut self, predicate: P, sink: Box<dyn Sink>)
    where
        P: Fn(&LogEvent) -> bool + Send + Sync + 'static,
    {
        self.routes.push(RouteRule {
            predicate: Box::new(predicate),
            sink,
        });
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Evaluate every rule against `event`
    pub fn route_event(&mut self, event: &LogEvent) {
        for (idx, route) in self.routes.iter_mut().enumerate() {
            let matched = match catch_unwind(AssertUnwindSafe(|| (route.predicate)(event))) {
                Ok(matched) => matched,
                Err(_) => {
                    fallback::report(&format!("Route #{} predicate panicked", idx));
                    continue;
                }
            };
            if !matched {
                continue;
            }

            let result = {
                let sink = &mut route.sink;
                catch_unwind(AssertUnwindSafe(|| sink.emit(event)))
            };
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    fallback::report(&format!("Route #{} sink failed: {}", idx, e));
                }
                Err(_) => {
                    fallback::report(&format!("Route #{} sink panicked", idx));
                }
            }
        }
    }
}
