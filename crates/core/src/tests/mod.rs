//! End-to-end session scenarios on virtual time

mod scenarios;
