//! Graph k-colouring encoded as a CSP: one variable per vertex with the
//! colours `0..k` as its domain, and one binary not-equal table constraint
//! per edge.

use std::collections::HashSet;

use crate::{
    error::{Result, SolverError},
    solver::{csp::Csp, value::StandardValue},
};

/// All ordered pairs of distinct colours from `0..k`, as satisfying tuples
/// for a binary not-equal constraint.
pub fn distinct_colour_pairs(k: i64) -> Vec<Vec<StandardValue>> {
    let mut tuples = Vec::new();
    for a in 0..k {
        for b in 0..k {
            if a != b {
                tuples.push(vec![StandardValue::Int(a), StandardValue::Int(b)]);
            }
        }
    }
    tuples
}

/// Builds the k-colouring model for the given graph.
///
/// Vertices become variables named after themselves; every edge `(u, v)`
/// becomes a constraint named `edge u-v` whose table holds every ordered
/// pair of distinct colours. The graph is integrity-checked first: duplicate
/// vertices, duplicate edges, and edges with unknown endpoints are rejected
/// as [`SolverError::InvalidGraph`].
pub fn k_colouring(
    name: impl Into<String>,
    vertices: &[String],
    edges: &[(String, String)],
    k: i64,
) -> Result<Csp<StandardValue>> {
    let vertex_set: HashSet<&str> = vertices.iter().map(String::as_str).collect();
    if vertex_set.len() != vertices.len() {
        return Err(SolverError::InvalidGraph("duplicate vertices".to_string()).into());
    }
    let edge_set: HashSet<(&str, &str)> = edges
        .iter()
        .map(|(u, v)| (u.as_str(), v.as_str()))
        .collect();
    if edge_set.len() != edges.len() {
        return Err(SolverError::InvalidGraph("duplicate edges".to_string()).into());
    }
    for (u, v) in edges {
        if !vertex_set.contains(u.as_str()) || !vertex_set.contains(v.as_str()) {
            return Err(
                SolverError::InvalidGraph(format!("edge ({u}, {v}) has an unknown endpoint"))
                    .into(),
            );
        }
    }

    let mut csp = Csp::new(name);
    let colours: Vec<_> = (0..k).map(StandardValue::Int).collect();
    let mut ids = std::collections::HashMap::new();
    for vertex in vertices {
        ids.insert(vertex.as_str(), csp.add_variable(vertex.clone(), colours.clone())?);
    }
    let pairs = distinct_colour_pairs(k);
    for (u, v) in edges {
        let scope = vec![ids[u.as_str()], ids[v.as_str()]];
        csp.add_constraint(format!("edge {u}-{v}"), scope, pairs.clone())?;
    }
    Ok(csp)
}
