//! # Differentiating Scalar Expressions
//!
//! Walks through the core workflow of the engine on three small graphs.
//!
//! ## Demonstrated:
//! 1. **Building an expression**: operation calls on a [`Graph`] record
//!    nodes eagerly; constants are promoted to leaves automatically.
//! 2. **Backward pass**: one `backward` call fills every reachable node's
//!    gradient accumulator.
//! 3. **A single neuron**: `tanh(w * x + b)` with gradients for each
//!    parameter.
//! 4. **Softmax probabilities**: a multi-output operation and one row of
//!    its Jacobian.
//!
//! ## Running
//! `cargo run --example expression_gradients`

use scalargrad_core::{Graph, ScalarGradError};

fn main() -> Result<(), ScalarGradError> {
    // --- 1. c = a * b + a ---
    let mut g = Graph::new();
    let a = g.leaf(2.0);
    let b = g.leaf(3.0);
    let prod = g.mul(a, b);
    let c = g.add(prod, a);

    println!("c = a * b + a  with a = 2, b = 3");
    println!("  c before backward: {}", g.node(c));

    g.backward(c);
    println!("  c after backward:  {}", g.node(c));
    println!("  dc/da = {} (b + 1)", g.grad(a));
    println!("  dc/db = {} (a)", g.grad(b));

    // --- 2. One neuron: n = tanh(w * x + b) ---
    let mut g = Graph::new();
    let w = g.leaf(-0.4);
    let x = g.leaf(1.5);
    let bias = g.leaf(0.2);
    let wx = g.mul(w, x);
    let pre = g.add(wx, bias);
    let n = g.tanh(pre);

    g.backward(n);
    println!("\nn = tanh(w * x + b)  with w = -0.4, x = 1.5, b = 0.2");
    println!("  n       = {}", g.value(n));
    println!("  dn/dw   = {}", g.grad(w));
    println!("  dn/dx   = {}", g.grad(x));
    println!("  dn/db   = {}", g.grad(bias));

    // --- 3. Softmax over three logits ---
    let mut g = Graph::new();
    let logits = [g.leaf(1.0), g.leaf(0.0), g.leaf(-1.0)];
    let probs = g.softmax(&logits)?;

    println!("\nsoftmax over logits [1.0, 0.0, -1.0]");
    for (i, &p) in probs.iter().enumerate() {
        println!("  p[{}] = {}", i, g.value(p));
    }

    // Differentiate the first probability alone: one Jacobian row.
    g.backward(probs[0]);
    println!("gradient of p[0] w.r.t. each logit:");
    for (i, &logit) in logits.iter().enumerate() {
        println!("  d p[0] / d logit[{}] = {}", i, g.grad(logit));
    }

    Ok(())
}
