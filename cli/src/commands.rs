use std::fmt::Write;

use gcdplan_core::context::{PlannerConfigExt, config_path};
use gcdplan_core::{EventId, Skill, SkillId, SkillKey, Timeline};

use crate::CliContext;

type CommandResult = Result<String, String>;

/// Resolve a skill argument given as a numeric id or a name
fn resolve_skill(timeline: &Timeline, arg: &str) -> Result<SkillKey, String> {
    let found = match arg.parse::<u32>() {
        Ok(id) => timeline.find_skill(SkillId(id)),
        Err(_) => timeline.find_skill_by_name(arg),
    };
    found.ok_or_else(|| format!("error: unknown skill '{arg}'"))
}

fn recast_column(skill: &Skill) -> String {
    match skill {
        Skill::Gcd(gcd) => format!("{:.2}s", gcd.actual_gcd_time()),
        Skill::Ability(ability) => {
            format!("{:.0}s x{}", ability.recast_time, ability.max_charges())
        }
    }
}

pub async fn show_catalog(ctx: &CliContext) -> CommandResult {
    let timeline = ctx.timeline.lock().await;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<8} {:<16} {:<5} {:>6} {:>8}  Recast",
        "Id", "Name", "Kind", "Cast", "Potency"
    );
    let _ = writeln!(out, "{}", "-".repeat(56));
    for key in timeline.skill_keys() {
        let Some(skill) = timeline.skill(key) else {
            continue;
        };
        let info = skill.info();
        let _ = writeln!(
            out,
            "{:<8} {:<16} {:<5} {:>5.1}s {:>8}  {}",
            info.id,
            info.name,
            skill.kind().label(),
            info.cast_time,
            info.potency,
            recast_column(skill)
        );
    }
    Ok(out)
}

pub async fn add_event(ctx: &CliContext, time: f64, skill: &str) -> CommandResult {
    let mut timeline = ctx.timeline.lock().await;
    let key = resolve_skill(&timeline, skill)?;
    let event = timeline
        .add_skill_event(time, key)
        .map_err(|e| format!("error: {e}"))?
        .clone();
    Ok(format!("{} {}", event.id(), timeline.describe_event(&event)))
}

pub async fn remove_event(ctx: &CliContext, id: u64) -> CommandResult {
    let mut timeline = ctx.timeline.lock().await;
    match timeline.remove_skill_event(EventId(id)) {
        Some(event) => Ok(format!("removed {}", event.id())),
        None => Err(format!("error: no event {}", EventId(id))),
    }
}

pub async fn move_event(ctx: &CliContext, id: u64, time: f64) -> CommandResult {
    let mut timeline = ctx.timeline.lock().await;
    let event = timeline
        .move_skill_event(EventId(id), time)
        .cloned()
        .ok_or_else(|| format!("error: no event {}", EventId(id)))?;
    Ok(format!("{} {}", event.id(), timeline.describe_event(&event)))
}

pub async fn list_events(ctx: &CliContext) -> CommandResult {
    let timeline = ctx.timeline.lock().await;
    if timeline.events().is_empty() {
        return Ok("timeline is empty".to_string());
    }

    let mut out = String::new();
    for event in timeline.events() {
        let _ = writeln!(out, "{:<5} {}", event.id(), timeline.describe_event(event));
    }
    Ok(out)
}

pub async fn show_available(ctx: &CliContext, time: f64, snapshot: bool) -> CommandResult {
    let mut timeline = ctx.timeline.lock().await;

    let available = if snapshot {
        timeline.available_skills_snapshot(time)
    } else {
        let available = timeline.available_skills(time);
        // The live query leaves the catalog at `time`
        timeline.revalidate();
        available
    };

    let names: Vec<&str> = available
        .iter()
        .filter_map(|key| timeline.skill(*key).map(Skill::name))
        .collect();
    if names.is_empty() {
        return Ok(format!("nothing available at {time:.2}s"));
    }
    Ok(format!("available at {time:.2}s: {}", names.join(", ")))
}

pub async fn show_stats(ctx: &CliContext) -> CommandResult {
    let timeline = ctx.timeline.lock().await;
    let stats = timeline.statistics();

    let mut out = String::new();
    let _ = writeln!(out, "Total uses:      {}", stats.total_uses);
    let _ = writeln!(out, "  GCD:           {}", stats.gcd_uses);
    let _ = writeln!(out, "  Abilities:     {}", stats.ability_uses);
    let _ = writeln!(out, "Total potency:   {}", stats.total_potency);
    let _ = writeln!(
        out,
        "Potency/sec:     {:.3} over {:.0}s",
        stats.potency_per_second,
        timeline.total_time()
    );
    Ok(out)
}

pub async fn set_spell_speed(ctx: &CliContext, value: u32) -> CommandResult {
    let modifier = {
        let mut timeline = ctx.timeline.lock().await;
        timeline.set_spell_speed(value);
        timeline.spell_speed_modifier()
    };
    ctx.config.write().await.spell_speed = value;
    Ok(format!("spell speed {value} (GCD x{modifier:.4})"))
}

pub async fn set_total_time(ctx: &CliContext, secs: f64) -> CommandResult {
    if !secs.is_finite() || secs < 0.0 {
        return Err("error: total time must be a non-negative number".to_string());
    }
    ctx.timeline.lock().await.set_total_time(secs);
    ctx.config.write().await.total_time_secs = secs;
    Ok(format!("total time {secs:.0}s"))
}

pub async fn clear(ctx: &CliContext) -> CommandResult {
    ctx.timeline.lock().await.clear_events();
    Ok("timeline cleared".to_string())
}

pub async fn show_config(ctx: &CliContext) -> CommandResult {
    let config = ctx.config.read().await;
    let path = config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|e| format!("<{e}>"));
    Ok(format!(
        "config file:  {path}\nspell speed:  {}\ntotal time:   {:.0}s\nsample skills: {}",
        config.spell_speed, config.total_time_secs, config.load_sample_catalog
    ))
}

pub async fn save_config(ctx: &CliContext) -> CommandResult {
    let config = ctx.config.read().await;
    config.save().map_err(|e| format!("error: {e}"))?;
    Ok("configuration saved".to_string())
}

pub fn exit() -> CommandResult {
    Ok("quitting...".to_string())
}
