pub mod base_layer_synthesizer;
pub mod censure_strategy;
