use std::error::Error;
use subnet_planner::output::{
    print_region_breakdown, print_result, print_site_example, render_tree, summary_json,
};
use subnet_planner::{allocate, config_or_default, example_site};

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default())?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SUBNET_PLANNER_CONFIG").ok());
    let config = config_or_default(config_path.as_deref())?;

    let result = allocate(&config)?;
    print_result(&result);
    println!();
    print!("{}", render_tree(&result.hierarchy));
    println!();
    print_region_breakdown(&result);
    println!();
    if let Some(example) = example_site(&result, config.vlan_size, &[])? {
        print_site_example(&example);
        println!();
    }
    println!("{}", summary_json(&result)?);

    Ok(())
}
