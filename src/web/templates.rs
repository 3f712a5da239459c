use minijinja::Environment;

const PAGE_TEMPLATE: &str = include_str!("templates/page.html");

/// Builds the template environment once per process. The template keeps its
/// `.html` name so minijinja auto-escapes everything interpolated into it.
pub fn build_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.add_template("page.html", PAGE_TEMPLATE)
        .expect("embedded page template always parses");
    env
}
