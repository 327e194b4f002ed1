use fibre_injector::{class, global, resolve};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. Define a service that depends on the abstraction
trait Reports: Send + Sync {
  fn generate_report(&self);
}

struct ReportService {
  logger: Arc<dyn Logger>,
}
impl Reports for ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    // ... logic to generate report ...
    self.logger.log("Finished report generation.");
  }
}

// 4. Declare the lineage the registry checks at registration time.
class!(dyn Logger);
class!(dyn Reports);
class!(ConsoleLogger: dyn Logger);
class!(ReportService: dyn Reports);

fn main() {
  // --- Registration ---
  global()
    .add_singleton::<dyn Logger, ConsoleLogger>(|| ConsoleLogger)
    .expect("ConsoleLogger is a Logger");

  // The ReportService factory *resolves* its own dependency.
  global()
    .add_singleton::<dyn Reports, ReportService>(|| ReportService {
      logger: resolve!(dyn Logger),
    })
    .expect("ReportService is a Reports");

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = resolve!(dyn Reports);

  println!("Using the service...");
  report_service.generate_report();
}
