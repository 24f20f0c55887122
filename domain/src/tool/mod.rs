//! Tool domain: definitions the model is offered, calls it makes back,
//! and the outputs returned to it.

pub mod entities;
