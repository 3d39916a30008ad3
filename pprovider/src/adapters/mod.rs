#[cfg(feature = "provider-openai")]
pub mod openai;

#[cfg(feature = "provider-anthropic")]
pub mod anthropic;

#[cfg(any(feature = "provider-openai", feature = "provider-anthropic"))]
mod status;
