// demos/basic_usage.rs
//! Basic usage example of the behavioral instruction compiler

use behavioral_compiler::BehavioralCompiler;

fn main() {
    let instructions = "
        At conversation start, search memory for all stored domains.
        When the user sends a message, match their query against domain keywords.
        If a domain matches, look for a specific route within that domain.
        If a route is found, execute the stored tool call.
        If no route matches, use available tools to discover the answer.
        After successful discovery, store the route with keywords from the query.
        If discovery found a new topic area, create a domain for it.
        Before responding, check if any output preferences apply.
    ";

    let compiler = BehavioralCompiler::new();
    println!("{}", compiler.info());

    println!("\n--- Compiled Directives ---\n");
    match compiler.compile(instructions) {
        Ok(directives) => println!("{}", directives),
        Err(error) => eprintln!("Compilation failed: {}", error),
    }

    println!("\n--- Classification Report ---\n");
    match compiler.compile_report(instructions) {
        Ok(report) => {
            for instruction in &report.instructions {
                println!("[{:>2}] {:<8} {}", instruction.id, instruction.kind.to_string(), instruction.original);
            }
            println!("\nEmitted order: {:?}", report.order);
        }
        Err(error) => eprintln!("Compilation failed: {}", error),
    }
}
