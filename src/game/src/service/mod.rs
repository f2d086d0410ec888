pub mod console;
pub mod game_loop;
pub mod table;
