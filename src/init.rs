use crate::hook::ElasticHook;
use crate::layer::ElasticLayer;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Subscriber installation options.
///
/// **Fields**
/// - `enable_stdout`: if `true`, a `tracing_subscriber::fmt::Layer` is
///   stacked on top of [`ElasticLayer`] so events are also printed to the
///   console.
#[derive(Clone, Debug)]
pub struct InitConfig {
    pub enable_stdout: bool,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self { enable_stdout: true }
    }
}

/// Install the global `tracing` subscriber with the given hook and
/// [`InitConfig`].
///
/// **Parameters**
/// - `hook`: constructed [`ElasticHook`]. Keep a clone of the `Arc` around
///   if you need to call `flush`/`cancel` on shutdown.
/// - `config`: [`InitConfig`] controlling the console layer.
///
/// **Effects**
///
/// Installs a [`Registry`] combined with [`ElasticLayer`] as the global
/// default subscriber, so all `tracing` events in the process are observed
/// by the layer.
pub fn init_tracing_with_config(hook: Arc<ElasticHook>, config: InitConfig) {
    let layer = ElasticLayer::new(hook);

    if config.enable_stdout {
        let fmt_layer = tracing_subscriber::fmt::layer();
        let subscriber = Registry::default().with(layer).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");
    } else {
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");
    }
}

/// Install the global subscriber with default options.
///
/// Equivalent to calling [`init_tracing_with_config`] with
/// [`InitConfig::default`].
pub fn init_tracing(hook: Arc<ElasticHook>) {
    init_tracing_with_config(hook, InitConfig::default());
}
