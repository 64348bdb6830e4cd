use anyhow::Context;
use std::sync::Arc;

use crate::module::{InitCtx, Module, SchemaDef};

/// Module registry for managing module lifecycle
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create a new module registry
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Register a module with the registry
    pub fn register(&mut self, module: Arc<dyn Module>) {
        self.modules.push(module);
    }

    /// Get all registered modules in registration order
    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    /// Initialize modules in registration order
    pub async fn init_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!("initializing {} modules", self.modules.len());

        for module in &self.modules {
            tracing::info!(module = module.name(), "initializing module");

            module
                .init(ctx)
                .await
                .with_context(|| format!("failed to initialize module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Start modules in registration order
    pub async fn start_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        for module in &self.modules {
            tracing::info!(module = module.name(), "starting module");

            module
                .start(ctx)
                .await
                .with_context(|| format!("failed to start module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Stop modules in reverse registration order
    pub async fn stop_modules(&self) -> anyhow::Result<()> {
        tracing::info!("stopping {} modules", self.modules.len());

        for module in self.modules.iter().rev() {
            tracing::info!(module = module.name(), "stopping module");

            module
                .stop()
                .await
                .with_context(|| format!("failed to stop module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Collect schema definitions from all modules, ordered by module name then id
    pub fn collect_schema(&self) -> Vec<(String, SchemaDef)> {
        let mut schema: Vec<(String, SchemaDef)> = self
            .modules
            .iter()
            .flat_map(|module| {
                module
                    .schema()
                    .into_iter()
                    .map(move |def| (module.name().to_string(), def))
            })
            .collect();

        schema.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id.cmp(b.1.id)));
        schema
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use std::sync::Mutex;

    struct TestModule {
        name: &'static str,
        events: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl Module for TestModule {
        fn name(&self) -> &'static str {
            self.name
        }

        fn schema(&self) -> Vec<SchemaDef> {
            vec![
                SchemaDef {
                    id: "002_index",
                    ddl: "CREATE INDEX IF NOT EXISTS test_idx ON test (id);",
                },
                SchemaDef {
                    id: "001_table",
                    ddl: "CREATE TABLE IF NOT EXISTS test (id TEXT);",
                },
            ]
        }

        async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
            self.events.lock().unwrap().push(format!("start {}", self.name));
            Ok(())
        }

        async fn stop(&self) -> anyhow::Result<()> {
            self.events.lock().unwrap().push(format!("stop {}", self.name));
            Ok(())
        }
    }

    #[test]
    fn test_module_registry_creation() {
        let registry = ModuleRegistry::new();
        assert!(registry.modules().is_empty());
        assert!(registry.collect_schema().is_empty());
    }

    #[test]
    fn test_schema_collection_is_sorted() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(TestModule {
            name: "zeta",
            events: events.clone(),
        }));
        registry.register(Arc::new(TestModule {
            name: "alpha",
            events,
        }));

        let ids: Vec<(String, &str)> = registry
            .collect_schema()
            .into_iter()
            .map(|(module, def)| (module, def.id))
            .collect();

        assert_eq!(
            ids,
            vec![
                ("alpha".to_string(), "001_table"),
                ("alpha".to_string(), "002_index"),
                ("zeta".to_string(), "001_table"),
                ("zeta".to_string(), "002_index"),
            ]
        );
    }

    #[tokio::test]
    async fn test_module_lifecycle_stops_in_reverse() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        let settings = Settings::default();
        let ctx = InitCtx {
            settings: &settings,
        };

        registry.register(Arc::new(TestModule {
            name: "first",
            events: events.clone(),
        }));
        registry.register(Arc::new(TestModule {
            name: "second",
            events: events.clone(),
        }));

        registry.init_modules(&ctx).await.unwrap();
        registry.start_modules(&ctx).await.unwrap();
        registry.stop_modules().await.unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["start first", "start second", "stop second", "stop first"]
        );
    }
}
