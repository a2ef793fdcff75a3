// handlers/mod.rs - two security tiers
//
// Public (no auth): /, /health, /login, POST /users
// Protected (bearer JWT): /users/*, /movies/*

pub mod protected;
pub mod public;
