use chomsky::grammar::{build, NonTerminal, Terminal};
use chomsky::normalize::{run_stages, NormalizeConfig};

fn main() -> anyhow::Result<()> {
  env_logger::init();

  // Symbol names are `Rc`-backed, so grammar errors are not `Send` and are
  // converted to `anyhow` errors by message.

  let s = NonTerminal::new("S");
  let a_nt = NonTerminal::new("A");
  let b_nt = NonTerminal::new("B");
  let a = Terminal::new("a");
  let b = Terminal::new("b");

  // S -> A S A | a B, A -> B | S, B -> b | ε
  let g = build(&s, |gb| {
    gb.declare_term(&a)
      .declare_term(&b)
      .add_rule(&s, |rb| {
        rb.add_prod(|pb| {
          pb.add_nonterm(&a_nt).add_nonterm(&s).add_nonterm(&a_nt);
        })
        .add_prod(|pb| {
          pb.add_term(&a).add_nonterm(&b_nt);
        });
      })
      .add_rule(&a_nt, |rb| {
        rb.add_prod(|pb| {
          pb.add_nonterm(&b_nt);
        })
        .add_prod(|pb| {
          pb.add_nonterm(&s);
        });
      })
      .add_rule(&b_nt, |rb| {
        rb.add_prod(|pb| {
          pb.add_term(&b);
        })
        .add_empty_prod();
      });
  })
  .map_err(|err| anyhow::anyhow!("{}", err))?;

  println!("Input:        {}", g);

  let stages = run_stages(&g, &NormalizeConfig::default())
    .map_err(|err| anyhow::anyhow!("{}", err))?;
  println!("Epsilon free: {}", stages.epsilon_free);
  println!("Unit free:    {}", stages.unit_free);
  println!("Reachable:    {}", stages.reachable);
  println!("Productive:   {}", stages.productive);
  println!("CNF:          {}", stages.cnf);

  let lab = chomsky::grammar::examples::make_lab_grammar();
  println!();
  println!("Input:        {}", lab);
  let cnf =
    chomsky::to_cnf(&lab).map_err(|err| anyhow::anyhow!("{}", err))?;
  println!("CNF:          {}", cnf);

  Ok(())
}
