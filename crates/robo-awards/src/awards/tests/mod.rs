mod common;
mod mode;
mod world_skills;
